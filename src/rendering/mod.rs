//! Terminal rendering of recommendations, the closet, and the profile.

use crate::models::{AppState, Category, StyledLook, TraitScores};
use std::fmt::Write as _;

/// Renders a resolved recommendation as terminal text.
///
/// When the plan is closet-sourced, the key item is cited as coming from
/// the closet regardless of the advisory suggestion fields; otherwise a
/// supplementary closet match is shown when one was found.
#[must_use]
pub fn render_look(look: &StyledLook, display_name: &str) -> String {
    let plan = &look.plan;
    let mut out = String::new();

    let _ = writeln!(out, "\"{}\"", plan.vibe_title);
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", plan.mood_boost);
    let _ = writeln!(out);

    if display_name == "User" {
        let _ = writeln!(out, "{}", plan.psych_analysis);
    } else {
        let _ = writeln!(out, "{display_name}, {}", plan.psych_analysis);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Color palette: {}", plan.hex_colors.join(" "));
    if !plan.color_psychology.is_empty() {
        let _ = writeln!(out, "{}", plan.color_psychology);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Archetype:  {}", plan.style_name);
    if !plan.silhouette.is_empty() {
        let _ = writeln!(out, "Silhouette: {}", plan.silhouette);
    }
    let _ = writeln!(out, "Key item:   {}", plan.key_item);
    if !plan.outfit_desc.is_empty() {
        let _ = writeln!(out, "Outfit:     {}", plan.outfit_desc);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Look image: {}", look.image_url);

    if !plan.shop_terms.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Shop the look:");
        for term in &plan.shop_terms {
            let _ = writeln!(out, "  - {term}");
        }
    }

    if plan.used_closet_item {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "From your closet: we built this look around your {}",
            plan.key_item
        );
    } else if let Some(item) = &look.closet_match {
        let _ = writeln!(out);
        let _ = writeln!(out, "Closet match: try your {}", item.desc);
    }

    out
}

/// Renders the closet inventory grouped by category.
#[must_use]
pub fn render_closet(state: &AppState) -> String {
    let mut out = String::new();

    for category in Category::all() {
        let _ = writeln!(out, "{category}");
        let items: Vec<_> = state
            .closet
            .iter()
            .filter(|item| item.category == *category)
            .collect();
        if items.is_empty() {
            let _ = writeln!(out, "  (no items yet)");
        }
        for item in items {
            let _ = writeln!(out, "  [{}] {} {}", item.id, item.color, item.desc);
        }
    }

    out
}

/// Renders the profile summary with trait bars.
#[must_use]
pub fn render_profile(state: &AppState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Name:        {}", state.preferences.name);
    let _ = writeln!(out, "Gender style: {}", state.preferences.gender);
    let _ = writeln!(out, "Skin tone:   {}", state.preferences.skin);
    let _ = writeln!(out, "Hair:        {}", state.preferences.hair);
    let _ = writeln!(out, "Hair style:  {}", state.preferences.hair_style);
    let _ = writeln!(out);
    let _ = writeln!(out, "Big Five summary");
    for (label, value) in state.traits.labeled() {
        let filled = usize::from(value);
        let empty = usize::from(TraitScores::MAX_SCORE - value.min(TraitScores::MAX_SCORE));
        let _ = writeln!(
            out,
            "  {label:<18} {}{} {value:>2}",
            "#".repeat(filled),
            "-".repeat(empty)
        );
    }

    out
}
