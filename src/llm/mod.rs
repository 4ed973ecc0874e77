//! Generative collaborator clients.
//!
//! Provides a unified interface over the hosted model that classifies
//! garment photos and generates outfit recommendations, plus the auxiliary
//! look-image endpoint.

mod gemini;
mod imagery;

pub use gemini::GeminiClient;
pub use imagery::{ImageryClient, PLACEHOLDER_IMAGE_URL};

use crate::models::{GarmentAnalysis, OutfitPlan};
use crate::{Error, Result};
use std::time::Duration;

/// Trait for styling collaborators.
///
/// The recommendation and classification contracts both live here so tests
/// can inject a single mock for the whole generative surface.
pub trait StylingProvider: Send + Sync {
    /// The provider name.
    fn name(&self) -> &'static str;

    /// Generates a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion fails.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Classifies a garment photo into category, color, and description.
    ///
    /// `image_b64` is the base64-encoded JPEG-equivalent payload. The
    /// collaborator must return all fields or fail loudly; partial data is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the call or response parsing fails.
    fn classify_garment(&self, image_b64: &str) -> Result<GarmentAnalysis>;

    /// Generates a structured outfit plan for the given context prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, the payload is not JSON, or a
    /// mandatory field is missing.
    ///
    /// Default implementation parses the raw completion; providers with
    /// native structured output can override.
    fn plan_outfit(&self, prompt: &str) -> Result<OutfitPlan> {
        let response = self.complete(prompt)?;
        parse_outfit_plan(&response)
    }
}

/// HTTP client configuration for collaborator requests.
#[derive(Debug, Clone, Copy)]
pub struct LlmHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for LlmHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl LlmHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("PSYCHIC_LLM_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("PSYCHIC_LLM_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

/// Builds a blocking HTTP client for collaborator requests.
#[must_use]
pub fn build_http_client(config: LlmHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build collaborator HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

/// Parses an outfit plan from collaborator output.
///
/// Handles markdown code fences around the JSON and enforces the non-empty
/// palette contract on top of the mandatory-field checks serde performs.
///
/// # Errors
///
/// Returns an error if the payload is not valid JSON for the schema or the
/// palette is empty.
pub fn parse_outfit_plan(response: &str) -> Result<OutfitPlan> {
    let json_str = extract_json_from_response(response);
    let plan: OutfitPlan =
        serde_json::from_str(json_str).map_err(|e| Error::OperationFailed {
            operation: "parse_outfit_plan".to_string(),
            cause: format!("Invalid JSON: {e}. Response: {response}"),
        })?;

    if plan.hex_colors.is_empty() {
        return Err(Error::OperationFailed {
            operation: "parse_outfit_plan".to_string(),
            cause: "hexColors must be a non-empty list".to_string(),
        });
    }

    Ok(plan)
}

/// Parses a garment analysis from collaborator output.
///
/// # Errors
///
/// Returns an error if the payload is not valid JSON for the schema; a
/// missing field or an out-of-enum category is an error, never partial data.
pub fn parse_garment_analysis(response: &str) -> Result<GarmentAnalysis> {
    let json_str = extract_json_from_response(response);
    serde_json::from_str(json_str).map_err(|e| Error::OperationFailed {
        operation: "parse_garment_analysis".to_string(),
        cause: format!("Invalid JSON: {e}. Response: {response}"),
    })
}

/// Extracts JSON from a model response, handling markdown code blocks.
fn extract_json_from_response(response: &str) -> &str {
    let trimmed = response.trim();

    // Handle ```json ... ``` blocks
    if let Some(start) = trimmed.find("```json") {
        let json_start = start + 7;
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // Handle ``` ... ``` blocks (without json marker)
    if let Some(start) = trimmed.find("```") {
        let content_start = start + 3;
        let after_marker = &trimmed[content_start..];
        let json_start = after_marker
            .find('{')
            .map_or(content_start, |pos| content_start + pos);
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // Handle raw JSON (find first { to last })
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            return &trimmed[start..=end];
        }
    }

    trimmed
}
