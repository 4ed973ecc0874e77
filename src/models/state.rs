//! Aggregate application state.

use super::{ClosetItem, HistoryItem, Preferences, TraitScores};

/// Aggregate root for all user data.
///
/// Built by [`crate::storage::StateStore::load`] and passed by reference to
/// services; there is no module-level global. Every persisted sub-collection
/// is committed to durable storage by the store before the in-memory value
/// changes.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Transient current mood; never persisted.
    pub current_mood: Option<String>,
    /// Owned clothing inventory.
    pub closet: Vec<ClosetItem>,
    /// Styling preferences.
    pub preferences: Preferences,
    /// Big Five trait scores.
    pub traits: TraitScores,
    /// Outfit history, newest first.
    pub history: Vec<HistoryItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert!(state.current_mood.is_none());
        assert!(state.closet.is_empty());
        assert!(state.history.is_empty());
        assert_eq!(state.traits.openness, 5);
        assert_eq!(state.preferences.name, "User");
    }
}
