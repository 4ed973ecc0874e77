//! Personality trait scores and styling preferences.

use serde::{Deserialize, Serialize};

/// Big Five personality summary derived from the questionnaire.
///
/// Each field is the sum of two Likert responses in [0, 10], so scores fall
/// in [0, 20]. Serialized under the single-letter keys the stored blobs have
/// always used, so older data loads unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitScores {
    /// Openness to experience.
    #[serde(rename = "O", default)]
    pub openness: u8,
    /// Conscientiousness.
    #[serde(rename = "C", default)]
    pub conscientiousness: u8,
    /// Extraversion.
    #[serde(rename = "E", default)]
    pub extraversion: u8,
    /// Agreeableness.
    #[serde(rename = "A", default)]
    pub agreeableness: u8,
    /// Sensitivity (neuroticism).
    #[serde(rename = "N", default)]
    pub sensitivity: u8,
}

impl Default for TraitScores {
    fn default() -> Self {
        Self {
            openness: 5,
            conscientiousness: 5,
            extraversion: 5,
            agreeableness: 5,
            sensitivity: 5,
        }
    }
}

impl TraitScores {
    /// Maximum value a single trait score can take.
    pub const MAX_SCORE: u8 = 20;

    /// Returns `(label, value)` pairs in display order.
    #[must_use]
    pub const fn labeled(&self) -> [(&'static str, u8); 5] {
        [
            ("Openness", self.openness),
            ("Conscientiousness", self.conscientiousness),
            ("Extraversion", self.extraversion),
            ("Agreeableness", self.agreeableness),
            ("Sensitivity", self.sensitivity),
        ]
    }
}

/// Styling preferences mutated field-by-field from the profile surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Display name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Gender style: Womenswear, Menswear, or Unisex.
    #[serde(default = "default_gender")]
    pub gender: String,
    /// Skin tone.
    #[serde(default = "default_skin")]
    pub skin: String,
    /// Hair color.
    #[serde(default = "default_hair")]
    pub hair: String,
    /// Hair style.
    #[serde(rename = "hairStyle", default = "default_hair_style")]
    pub hair_style: String,
}

fn default_name() -> String {
    "User".to_string()
}

fn default_gender() -> String {
    "Womenswear".to_string()
}

fn default_skin() -> String {
    "Medium".to_string()
}

fn default_hair() -> String {
    "Brown".to_string()
}

fn default_hair_style() -> String {
    "Long Straight".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            name: default_name(),
            gender: default_gender(),
            skin: default_skin(),
            hair: default_hair(),
            hair_style: default_hair_style(),
        }
    }
}
