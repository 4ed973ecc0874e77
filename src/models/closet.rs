//! Closet inventory types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clothing categories.
///
/// A closed enumeration; category strings from the classification
/// collaborator or the CLI are validated at the inventory-manager boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Coats, jackets, and other outer layers.
    Outerwear,
    /// Shirts, blouses, knitwear.
    #[default]
    Tops,
    /// Trousers, skirts, shorts.
    Bottoms,
    /// Shoes, bags, jewellery, and everything else.
    Accessories,
}

impl Category {
    /// Returns all category variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Outerwear, Self::Tops, Self::Bottoms, Self::Accessories]
    }

    /// Returns the category as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Outerwear => "Outerwear",
            Self::Tops => "Tops",
            Self::Bottoms => "Bottoms",
            Self::Accessories => "Accessories",
        }
    }

    /// Parses a category from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "outerwear" => Some(Self::Outerwear),
            "tops" => Some(Self::Tops),
            "bottoms" => Some(Self::Bottoms),
            "accessories" => Some(Self::Accessories),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-owned clothing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosetItem {
    /// Creation-timestamp-derived identifier, unique within the inventory.
    pub id: u64,
    /// Inline base64-encoded image payload.
    pub img: String,
    /// Clothing category; mutable by the user after classification.
    pub category: Category,
    /// Free-text color, e.g. "Navy Blue".
    pub color: String,
    /// Short free-text description, e.g. "Denim Jacket".
    pub desc: String,
}

impl ClosetItem {
    /// Renders the item the way the recommendation prompt expects it.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} {} ({})", self.color, self.desc, self.category)
    }
}
