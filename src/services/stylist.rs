//! Recommendation requester.
//!
//! Assembles the full styling context into one prompt, consumes the
//! collaborator's structured response, resolves the look image, and appends
//! exactly one history entry per success.

use crate::llm::{ImageryClient, StylingProvider};
use crate::models::{AppState, Category, ClosetItem, HistoryItem, LookRequest, StyledLook};
use crate::storage::StateStore;
use crate::{Error, Result};
use chrono::Local;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Service for requesting outfit recommendations.
pub struct StylistService {
    /// State store handle.
    store: Arc<StateStore>,
    /// Recommendation collaborator.
    provider: Arc<dyn StylingProvider>,
    /// Look-image endpoint.
    imagery: ImageryClient,
    /// Single in-flight request slot.
    in_flight: AtomicBool,
}

impl StylistService {
    /// Creates a new stylist service.
    #[must_use]
    pub fn new(
        store: Arc<StateStore>,
        provider: Arc<dyn StylingProvider>,
        imagery: ImageryClient,
    ) -> Self {
        Self {
            store,
            provider,
            imagery,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Requests an outfit recommendation for today's context.
    ///
    /// Preconditions: `state.current_mood` must be set; a second request
    /// while one is outstanding is rejected. On success, exactly one
    /// [`HistoryItem`] is prepended to history and the history slice is
    /// committed before the in-memory state changes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if no current mood is set (the request
    ///   never starts).
    /// - [`Error::RequestInFlight`] on a concurrent duplicate submission.
    /// - [`Error::OperationFailed`] if the collaborator call, response
    ///   parsing, or history write fails; nothing is written to history and
    ///   the caller may retry manually.
    pub fn request(&self, state: &mut AppState, request: &LookRequest) -> Result<StyledLook> {
        let Some(mood) = state.current_mood.clone() else {
            return Err(Error::InvalidInput(
                "Select your current mood first".to_string(),
            ));
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::RequestInFlight {
                operation: "generate_look".to_string(),
            });
        }
        let _slot = InFlightSlot(&self.in_flight);

        let prompt = build_prompt(state, &mood, request);
        tracing::debug!(chars = prompt.len(), "recommendation prompt assembled");

        let plan = self.provider.plan_outfit(&prompt)?;

        let image_url =
            self.imagery
                .resolve(&plan.key_item, &plan.style_name, &state.preferences.gender);

        // When the collaborator did not source from the closet, rescan the
        // inventory against its advisory suggestion. The primary
        // recommendation is never altered by the result.
        let closet_match = if plan.used_closet_item {
            None
        } else {
            find_closet_match(&state.closet, &plan.suggested_category, &plan.suggested_color)
                .cloned()
        };

        let entry = HistoryItem {
            date: Local::now().format("%Y-%m-%d").to_string(),
            title: plan.vibe_title.clone(),
            img: image_url.clone(),
        };
        let mut history = Vec::with_capacity(state.history.len() + 1);
        history.push(entry);
        history.extend(state.history.iter().cloned());
        self.store.save_history(&history)?;
        state.history = history;

        tracing::info!(
            vibe = %plan.vibe_title,
            from_closet = plan.used_closet_item,
            "look generated"
        );

        Ok(StyledLook {
            plan,
            image_url,
            closet_match,
        })
    }
}

/// Releases the in-flight slot on scope exit, including error paths.
struct InFlightSlot<'a>(&'a AtomicBool);

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Builds the recommendation prompt from the full styling context.
fn build_prompt(state: &AppState, mood: &str, request: &LookRequest) -> String {
    let closet_summary = if state.closet.is_empty() {
        "No items in closet".to_string()
    } else {
        let summaries: Vec<String> = state.closet.iter().map(ClosetItem::summary).collect();
        serde_json::to_string(&summaries).unwrap_or_else(|_| summaries.join(", "))
    };

    let preferences = serde_json::to_string(&state.preferences).unwrap_or_default();
    let traits = serde_json::to_string(&state.traits).unwrap_or_default();

    format!(
        r#"User: {name}.
Profile: {preferences}.
Traits: {traits}.
Current Mood: {mood}.
Goal Mood: {goal}.
Context: {occasion}.
Weather: {weather}, {temp}C.

CLOSET INVENTORY: {closet_summary}.

Act as a fashion psychologist named "Psychic".

CRITICAL INSTRUCTION:
1. SCAN the User's Closet Inventory FIRST.
2. Is there an item in the closet that FITS the mood/weather/goal?
3. IF YES: You MUST choose that item as the "keyItem". Set "usedClosetItem": true.
4. IF NO: Suggest a new item. Set "usedClosetItem": false.

Strictly analyze Temperature for feasibility.

Return JSON with keys: "vibeTitle", "moodBoost", "psychAnalysis", "styleName", "silhouette", "keyItem", "usedClosetItem" (boolean), "hexColors" (array of hex strings), "colorPsychology", "outfitDesc", "shopTerms" (array of strings), "suggestedCategory" (one of: "Outerwear", "Tops", "Bottoms", "Accessories"), "suggestedColor". Only output the JSON, no other text."#,
        name = state.preferences.name,
        goal = request.goal,
        occasion = request.occasion,
        weather = request.weather,
        temp = request.temp_c,
    )
}

/// Finds an inventory item matching an advisory category/color suggestion.
///
/// The category must parse into the closed enumeration and match exactly;
/// the colors match when either string contains the other,
/// case-insensitively. Empty suggestions never match.
#[must_use]
pub fn find_closet_match<'a>(
    closet: &'a [ClosetItem],
    suggested_category: &str,
    suggested_color: &str,
) -> Option<&'a ClosetItem> {
    if suggested_category.is_empty() || suggested_color.is_empty() {
        return None;
    }
    let category = Category::parse(suggested_category)?;
    let wanted = suggested_color.to_lowercase();

    closet.iter().find(|item| {
        let owned = item.color.to_lowercase();
        item.category == category && (owned.contains(&wanted) || wanted.contains(&owned))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Preferences, TraitScores};

    fn item(category: Category, color: &str) -> ClosetItem {
        ClosetItem {
            id: 1,
            img: String::new(),
            category,
            color: color.to_string(),
            desc: "Oxford Shirt".to_string(),
        }
    }

    #[test]
    fn test_closet_match_substring_both_directions() {
        let closet = vec![item(Category::Tops, "Navy Blue")];

        // Suggested color is a substring of the owned color.
        let found = find_closet_match(&closet, "Tops", "Blue");
        assert!(found.is_some());

        // Owned color is a substring of the suggested color.
        let closet = vec![item(Category::Tops, "Blue")];
        let found = find_closet_match(&closet, "Tops", "Dusty Blue");
        assert!(found.is_some());
    }

    #[test]
    fn test_closet_match_requires_category_equality() {
        let closet = vec![item(Category::Bottoms, "Navy Blue")];
        assert!(find_closet_match(&closet, "Tops", "Blue").is_none());
    }

    #[test]
    fn test_closet_match_rejects_unknown_category_and_empty_inputs() {
        let closet = vec![item(Category::Tops, "Navy Blue")];
        assert!(find_closet_match(&closet, "Shoes", "Blue").is_none());
        assert!(find_closet_match(&closet, "", "Blue").is_none());
        assert!(find_closet_match(&closet, "Tops", "").is_none());
    }

    #[test]
    fn test_prompt_embeds_context_and_closet() {
        let mut state = AppState {
            preferences: Preferences {
                name: "Ada".to_string(),
                ..Preferences::default()
            },
            traits: TraitScores::default(),
            ..AppState::default()
        };
        state.closet.push(item(Category::Tops, "Navy Blue"));

        let request = LookRequest {
            goal: "confident".to_string(),
            occasion: "Office".to_string(),
            weather: "Rainy".to_string(),
            temp_c: 12,
        };
        let prompt = build_prompt(&state, "Anxious", &request);

        assert!(prompt.contains("User: Ada."));
        assert!(prompt.contains("Current Mood: Anxious."));
        assert!(prompt.contains("Goal Mood: confident."));
        assert!(prompt.contains("Rainy, 12C"));
        assert!(prompt.contains("Navy Blue Oxford Shirt (Tops)"));
    }

    #[test]
    fn test_prompt_empty_closet_marker() {
        let state = AppState::default();
        let prompt = build_prompt(&state, "Calm", &LookRequest::default());
        assert!(prompt.contains("No items in closet"));
    }
}
