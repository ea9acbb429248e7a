//! Error types for map edits and catalog loading

use crate::ItemId;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by edits against the grid store or the free-object tracker.
///
/// Every variant is returned before any state is touched, so a failed edit
/// never leaves a partially applied change behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("Unknown item id: {0}")]
    UnknownItemId(ItemId),
    #[error("Item {0} is a free object and cannot be placed on the grid")]
    NotGridSnapped(ItemId),
    #[error("Item {0} is grid-snapped and cannot be placed as a free object")]
    NotFreeObject(ItemId),
    #[error("Item {item_id} is a fixed anchor and cannot be removed")]
    ProtectedObjectRemoval { item_id: ItemId },
    #[error("No free object with id {0}")]
    UnknownObject(Uuid),
}

/// Errors that can occur when loading or saving an item catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("Invalid catalog: {0}")]
    Invalid(String),
}
