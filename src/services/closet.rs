//! Closet inventory manager.
//!
//! CRUD over the owned-clothing inventory. Item creation runs the photo
//! through the classification collaborator; a collaborator failure aborts
//! the operation before anything is mutated or written.

use crate::llm::StylingProvider;
use crate::models::{AppState, Category, ClosetItem};
use crate::storage::StateStore;
use crate::{Result, current_timestamp_millis};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;

/// Service for managing the closet inventory.
pub struct ClosetService {
    /// State store handle.
    store: Arc<StateStore>,
    /// Classification collaborator.
    provider: Arc<dyn StylingProvider>,
}

impl ClosetService {
    /// Creates a new closet service.
    #[must_use]
    pub fn new(store: Arc<StateStore>, provider: Arc<dyn StylingProvider>) -> Self {
        Self { store, provider }
    }

    /// Adds a clothing item from raw image bytes.
    ///
    /// Encodes the photo, asks the collaborator for category/color/
    /// description, assigns a fresh identifier, appends, and commits the
    /// closet slice. The in-memory inventory only changes after the commit
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if classification or the storage write fails; in
    /// either case the inventory is left exactly as it was and nothing is
    /// written. No retry is attempted.
    pub fn add_item(&self, state: &mut AppState, image_bytes: &[u8]) -> Result<ClosetItem> {
        let image_b64 = BASE64.encode(image_bytes);
        let analysis = self.provider.classify_garment(&image_b64)?;

        let item = ClosetItem {
            id: next_item_id(&state.closet),
            img: image_b64,
            category: analysis.category,
            color: analysis.color,
            desc: analysis.desc,
        };

        let mut closet = state.closet.clone();
        closet.push(item.clone());
        self.store.save_closet(&closet)?;
        state.closet = closet;

        tracing::info!(id = item.id, category = %item.category, "closet item added");
        Ok(item)
    }

    /// Removes the item with the given identifier.
    ///
    /// A missing identifier is a no-op (returns `false`); the closet slice
    /// is committed either way, so the call is idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn remove_item(&self, state: &mut AppState, id: u64) -> Result<bool> {
        let closet: Vec<ClosetItem> = state
            .closet
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        let removed = closet.len() != state.closet.len();

        self.store.save_closet(&closet)?;
        state.closet = closet;

        if removed {
            tracing::info!(id, "closet item removed");
        }
        Ok(removed)
    }

    /// Replaces the category of the item with the given identifier.
    ///
    /// A missing identifier is a no-op (returns `false`); the closet slice
    /// is committed either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn recategorize(&self, state: &mut AppState, id: u64, category: Category) -> Result<bool> {
        let mut closet = state.closet.clone();
        let mut changed = false;
        for item in &mut closet {
            if item.id == id {
                item.category = category;
                changed = true;
            }
        }

        self.store.save_closet(&closet)?;
        state.closet = closet;

        Ok(changed)
    }
}

/// Returns a fresh creation-timestamp-derived identifier.
///
/// Two adds inside the same millisecond would collide, so the candidate is
/// bumped until unique within the inventory.
fn next_item_id(closet: &[ClosetItem]) -> u64 {
    let mut id = current_timestamp_millis();
    while closet.iter().any(|item| item.id == id) {
        id += 1;
    }
    id
}
