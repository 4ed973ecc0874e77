//! Persistent state store.
//!
//! User data is persisted as independently-keyed JSON files under a data
//! directory: `traits`, `prefs`, `closet`, `history`, plus a one-shot
//! `tutorial` flag. Each key is idempotently overwritten in full on every
//! commit; there is no batching, journaling, or cross-key transactionality.
//!
//! A corrupt slice on disk never propagates a parse error: `load` fails
//! closed to the default value for that slice and logs a warning. The next
//! successful commit overwrites the corrupt file.

use crate::models::{AppState, ClosetItem, HistoryItem, Preferences, TraitScores};
use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key for trait scores.
const TRAITS_KEY: &str = "traits";
/// Storage key for preferences.
const PREFS_KEY: &str = "prefs";
/// Storage key for the closet inventory.
const CLOSET_KEY: &str = "closet";
/// Storage key for outfit history.
const HISTORY_KEY: &str = "history";
/// Storage key for the one-shot quick-start flag.
const TUTORIAL_KEY: &str = "tutorial";

/// String-keyed JSON store for all persisted user data.
///
/// One instance is created at startup and handed by reference to every
/// surface that mutates state; a commit is one durable write of one slice.
pub struct StateStore {
    /// Base directory for storage.
    base_path: PathBuf,
}

impl StateStore {
    /// Creates a new store rooted at `base_path`.
    ///
    /// The directory is created on the first commit if it does not exist.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Creates a new store with checked directory creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_create(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| Error::OperationFailed {
            operation: "create_storage_dir".to_string(),
            cause: e.to_string(),
        })?;
        Ok(Self { base_path })
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Loads the full application state.
    ///
    /// Each key present on disk is merged over the hardcoded default state;
    /// absent keys keep their defaults. The transient mood always starts
    /// unset. This never fails: corrupt slices fall back per key.
    #[must_use]
    pub fn load(&self) -> AppState {
        let mut state = AppState::default();
        if let Some(traits) = self.read_slice::<TraitScores>(TRAITS_KEY) {
            state.traits = traits;
        }
        if let Some(prefs) = self.read_slice::<Preferences>(PREFS_KEY) {
            state.preferences = prefs;
        }
        if let Some(closet) = self.read_slice::<Vec<ClosetItem>>(CLOSET_KEY) {
            state.closet = closet;
        }
        if let Some(history) = self.read_slice::<Vec<HistoryItem>>(HISTORY_KEY) {
            state.history = history;
        }
        state
    }

    /// Returns whether trait scores have ever been saved.
    ///
    /// Used to decide whether to open the questionnaire on first run.
    #[must_use]
    pub fn has_traits(&self) -> bool {
        self.slice_path(TRAITS_KEY).exists()
    }

    /// Commits the trait scores slice.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_traits(&self, traits: &TraitScores) -> Result<()> {
        self.write_slice(TRAITS_KEY, traits)
    }

    /// Commits the preferences slice.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.write_slice(PREFS_KEY, preferences)
    }

    /// Commits the closet slice in full.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_closet(&self, closet: &[ClosetItem]) -> Result<()> {
        self.write_slice(CLOSET_KEY, &closet)
    }

    /// Commits the history slice in full.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_history(&self, history: &[HistoryItem]) -> Result<()> {
        self.write_slice(HISTORY_KEY, &history)
    }

    /// Returns whether the one-shot quick-start note has been shown.
    #[must_use]
    pub fn quickstart_seen(&self) -> bool {
        self.read_slice::<bool>(TUTORIAL_KEY).unwrap_or(false)
    }

    /// Marks the quick-start note as shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn mark_quickstart_seen(&self) -> Result<()> {
        self.write_slice(TUTORIAL_KEY, &true)
    }

    /// Returns the file path for a storage key.
    fn slice_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }

    /// Reads and deserializes one slice.
    ///
    /// Fails closed: a missing file yields `None`, and an unreadable or
    /// corrupt file is logged and yields `None` so the caller keeps the
    /// default for that slice.
    fn read_slice<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.slice_path(key);
        if !path.exists() {
            return None;
        }

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read state slice, using defaults");
                return None;
            },
        };

        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt state slice, using defaults");
                None
            },
        }
    }

    /// Serializes and writes one slice under its fixed key.
    fn write_slice<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        // Ensure directory exists before storing
        let _ = fs::create_dir_all(&self.base_path);

        let json = serde_json::to_string_pretty(value).map_err(|e| Error::OperationFailed {
            operation: format!("serialize_{key}"),
            cause: e.to_string(),
        })?;

        fs::write(self.slice_path(key), json).map_err(|e| Error::OperationFailed {
            operation: format!("write_{key}"),
            cause: e.to_string(),
        })?;

        Ok(())
    }
}
