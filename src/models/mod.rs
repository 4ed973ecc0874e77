//! Data models for psychic.
//!
//! This module contains all the core data structures used throughout the
//! system, including the wire models exchanged with the generative
//! collaborators.

mod closet;
mod look;
mod profile;
mod state;

pub use closet::{Category, ClosetItem};
pub use look::{GarmentAnalysis, HistoryItem, LookRequest, OutfitPlan, StyledLook};
pub use profile::{Preferences, TraitScores};
pub use state::AppState;
