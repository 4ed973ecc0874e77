//! # Psychic
//!
//! A psychology-first personal styling assistant.
//!
//! Psychic combines a short Big Five questionnaire, a photo inventory of
//! owned clothing, and daily context (mood, goal, weather) to request a
//! generated outfit recommendation from a hosted generative model.
//!
//! ## Features
//!
//! - Local-first: all user data lives in string-keyed JSON files on disk
//! - Closet items enriched by an image-classification call
//! - Structured-JSON recommendation contract with supplementary closet matching
//! - Three CLI surfaces: `daily`, `closet`, `profile`
//!
//! ## Example
//!
//! ```rust,ignore
//! use psychic::{StateStore, StylistService, LookRequest};
//!
//! let store = StateStore::new(data_dir);
//! let mut state = store.load();
//! state.current_mood = Some("Calm".to_string());
//! let look = service.request(&mut state, LookRequest {
//!     goal: "confident".to_string(),
//!     ..Default::default()
//! })?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod llm;
pub mod models;
pub mod rendering;
pub mod scoring;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::PsychicConfig;
pub use llm::{GeminiClient, ImageryClient, StylingProvider};
pub use models::{
    AppState, Category, ClosetItem, GarmentAnalysis, HistoryItem, LookRequest, OutfitPlan,
    Preferences, StyledLook, TraitScores,
};
pub use scoring::{QUESTIONS, score};
pub use services::{ClosetService, StylistService};
pub use storage::StateStore;

/// Error type for psychic operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Precondition not met, unknown category string, malformed request |
/// | `OperationFailed` | Collaborator call fails, storage write fails |
/// | `RequestInFlight` | A second request is submitted while one is outstanding |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A recommendation is requested with no current mood selected
    /// - A category string outside the closed four-value set is given
    /// - Questionnaire input violates the documented contract
    ///
    /// The operation never starts; the caller can correct the input and retry.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The classification or recommendation collaborator errors (network,
    ///   timeout, non-2xx, malformed/non-JSON payload, missing required field)
    /// - A state slice cannot be serialized or written to disk
    ///
    /// No partial state is committed; the caller may retry manually.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A request was rejected because another is still outstanding.
    ///
    /// The recommendation requester holds a single in-flight slot; a quick
    /// double-submit is rejected rather than queued.
    #[error("request '{operation}' rejected: another request is in flight")]
    RequestInFlight {
        /// The operation that was rejected.
        operation: String,
    },
}

/// Result type alias for psychic operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in milliseconds.
///
/// Centralized so closet item identifiers and history entries derive from a
/// single clock source. Falls back to 0 if the system clock is before the
/// Unix epoch.
///
/// # Examples
///
/// ```rust
/// use psychic::current_timestamp_millis;
///
/// let ts = current_timestamp_millis();
/// assert!(ts > 0);
/// ```
#[must_use]
pub fn current_timestamp_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "test".to_string(),
            cause: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'test' failed: failed");

        let err = Error::RequestInFlight {
            operation: "generate_look".to_string(),
        };
        assert!(err.to_string().contains("in flight"));
    }

    #[test]
    fn test_timestamp_is_monotonic_enough() {
        let a = current_timestamp_millis();
        let b = current_timestamp_millis();
        assert!(b >= a);
    }
}
