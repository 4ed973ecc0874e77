//! Service layer.
//!
//! Services orchestrate the state store and the generative collaborators.
//! Each mutation commits its slice to durable storage before the in-memory
//! state changes.

mod closet;
mod stylist;

pub use closet::ClosetService;
pub use stylist::{StylistService, find_closet_match};
