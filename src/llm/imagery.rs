//! Look-image endpoint.
//!
//! The generated recommendation is illustrated by a hosted text-to-image
//! endpoint addressed purely by URL. The endpoint accepts a seed per call,
//! so results are not deterministic; any failure falls back to a fixed
//! placeholder image URL.

use super::{LlmHttpConfig, build_http_client};
use crate::current_timestamp_millis;

/// Fixed placeholder shown when image generation fails.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?w=800&q=80";

/// Client for the auxiliary look-image endpoint.
pub struct ImageryClient {
    /// Base URL of the prompt endpoint.
    base_url: String,
    /// HTTP client used to probe the generated URL.
    client: reqwest::blocking::Client,
}

impl ImageryClient {
    /// Default endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://image.pollinations.ai/prompt";

    /// Creates a new imagery client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            client: build_http_client(LlmHttpConfig::from_env()),
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the short image prompt from the recommendation.
    ///
    /// The key item is truncated to its first three words; the gender
    /// qualifier follows the gender-style preference.
    #[must_use]
    pub fn look_prompt(key_item: &str, style_name: &str, gender: &str) -> String {
        let qualifier = if gender == "Menswear" { "man" } else { "woman" };
        let short_item = if key_item.trim().is_empty() {
            "fashion".to_string()
        } else {
            key_item
                .split_whitespace()
                .take(3)
                .collect::<Vec<_>>()
                .join(" ")
        };
        format!("fashion photo, {qualifier}, {short_item}, {style_name} style")
    }

    /// Builds the full generation URL for a prompt, with a per-call seed.
    ///
    /// Returns `None` if the base URL cannot be parsed.
    #[must_use]
    pub fn look_url(&self, prompt: &str, seed: u64) -> Option<String> {
        let mut url = reqwest::Url::parse(&self.base_url).ok()?;
        url.path_segments_mut().ok()?.push(prompt);
        url.query_pairs_mut()
            .append_pair("width", "800")
            .append_pair("height", "1000")
            .append_pair("nologo", "true")
            .append_pair("seed", &seed.to_string());
        Some(url.to_string())
    }

    /// Resolves the look image for a recommendation.
    ///
    /// Builds the generation URL and probes it; on any failure (bad base
    /// URL, network error, non-2xx) the fixed placeholder is returned.
    #[must_use]
    pub fn resolve(&self, key_item: &str, style_name: &str, gender: &str) -> String {
        let prompt = Self::look_prompt(key_item, style_name, gender);
        let seed = current_timestamp_millis() % 1_000_000;

        let Some(url) = self.look_url(&prompt, seed) else {
            tracing::warn!(base_url = %self.base_url, "invalid imagery base URL, using placeholder");
            return PLACEHOLDER_IMAGE_URL.to_string();
        };

        match self.client.get(&url).send() {
            Ok(response) if response.status().is_success() => url,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "image generation failed, using placeholder");
                PLACEHOLDER_IMAGE_URL.to_string()
            },
            Err(e) => {
                tracing::warn!(error = %e, "image generation unreachable, using placeholder");
                PLACEHOLDER_IMAGE_URL.to_string()
            },
        }
    }
}

impl Default for ImageryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Charcoal Wool Blazer with lapels", "Minimalist", "Menswear",
        "fashion photo, man, Charcoal Wool Blazer, Minimalist style"; "menswear truncates to three words")]
    #[test_case("Silk Slip Dress", "Romantic", "Womenswear",
        "fashion photo, woman, Silk Slip Dress, Romantic style"; "womenswear keeps short item")]
    #[test_case("", "Grunge", "Unisex",
        "fashion photo, woman, fashion, Grunge style"; "empty key item falls back")]
    fn test_look_prompt(key_item: &str, style: &str, gender: &str, expected: &str) {
        assert_eq!(ImageryClient::look_prompt(key_item, style, gender), expected);
    }

    #[test]
    fn test_look_url_encodes_prompt() {
        let client = ImageryClient::new();
        let url = client
            .look_url("fashion photo, woman, Silk Dress", 42)
            .unwrap();
        assert!(url.starts_with(ImageryClient::DEFAULT_BASE_URL));
        assert!(!url.contains(' '));
        assert!(url.contains("seed=42"));
        assert!(url.contains("width=800"));
    }

    #[test]
    fn test_resolve_falls_back_on_unreachable_endpoint() {
        // Connection refused locally resolves to the placeholder.
        let client = ImageryClient::new().with_base_url("http://127.0.0.1:9/prompt");
        let url = client.resolve("Denim Jacket", "Casual", "Womenswear");
        assert_eq!(url, PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_resolve_falls_back_on_invalid_base_url() {
        let client = ImageryClient::new().with_base_url("not a url");
        let url = client.resolve("Denim Jacket", "Casual", "Womenswear");
        assert_eq!(url, PLACEHOLDER_IMAGE_URL);
    }
}
