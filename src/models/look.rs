//! Recommendation request and response models.

use super::{Category, ClosetItem};
use serde::{Deserialize, Serialize};

/// Structured analysis of a single garment photo.
///
/// The classification collaborator must return all three fields; partial
/// data is an error, enforced by deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GarmentAnalysis {
    /// One of the four closed categories.
    pub category: Category,
    /// Free-text color, e.g. "Navy Blue".
    pub color: String,
    /// Short description, e.g. "Denim Jacket".
    pub desc: String,
}

/// Daily context inputs for a recommendation request.
///
/// The current mood is not part of the request; it lives on
/// [`super::AppState`] and is validated as a precondition.
#[derive(Debug, Clone)]
pub struct LookRequest {
    /// The emotional state the user wants to achieve.
    pub goal: String,
    /// Where the day is spent, e.g. "Office" or "Date".
    pub occasion: String,
    /// Weather summary, e.g. "Rainy".
    pub weather: String,
    /// Temperature in degrees Celsius.
    pub temp_c: i16,
}

impl Default for LookRequest {
    fn default() -> Self {
        Self {
            goal: "calm".to_string(),
            occasion: "University".to_string(),
            weather: "Sunny".to_string(),
            temp_c: 4,
        }
    }
}

/// Structured outfit recommendation from the generative collaborator.
///
/// Field names match the collaborator's JSON schema. `vibeTitle`,
/// `moodBoost`, `psychAnalysis`, `styleName`, `keyItem`, `usedClosetItem`,
/// and a non-empty `hexColors` are mandatory; the remainder is best-effort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitPlan {
    /// Editorial title for the look.
    pub vibe_title: String,
    /// Short mood-boost note.
    pub mood_boost: String,
    /// Psychological rationale paragraph.
    pub psych_analysis: String,
    /// Style archetype name.
    pub style_name: String,
    /// Silhouette description.
    #[serde(default)]
    pub silhouette: String,
    /// The single item the look is built around.
    pub key_item: String,
    /// Whether the key item was drawn from the user's closet.
    pub used_closet_item: bool,
    /// Ordered color palette as hex-like strings.
    pub hex_colors: Vec<String>,
    /// Color-psychology paragraph.
    #[serde(default)]
    pub color_psychology: String,
    /// Full outfit description.
    #[serde(default)]
    pub outfit_desc: String,
    /// Shoppable search terms.
    #[serde(default)]
    pub shop_terms: Vec<String>,
    /// Advisory category for opportunistic closet matching.
    #[serde(default)]
    pub suggested_category: String,
    /// Advisory color for opportunistic closet matching.
    #[serde(default)]
    pub suggested_color: String,
}

/// A fully resolved recommendation as returned to the presentation layer.
#[derive(Debug, Clone)]
pub struct StyledLook {
    /// The collaborator's recommendation.
    pub plan: OutfitPlan,
    /// Resolved look image (generated, or the placeholder on failure).
    pub image_url: String,
    /// Supplementary closet match found by the caller-side rescan.
    ///
    /// Only populated when the plan is not closet-sourced; the primary
    /// recommendation is never altered by it.
    pub closet_match: Option<ClosetItem>,
}

/// One entry in the outfit history.
///
/// Append-only and newest-first; entries are never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Date the look was generated.
    pub date: String,
    /// The recommendation's vibe title.
    pub title: String,
    /// Reference to the generated look image.
    pub img: String,
}
