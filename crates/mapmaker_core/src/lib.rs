//! Core data structures for mapmaker
//!
//! This crate provides the fundamental types for the level-design data engine:
//! - `ItemCatalog` - Static metadata per placeable item id
//! - `SparseGridStore` - Unbounded cell -> `TileState` map
//! - `CameraOrigin` - Pannable origin and pixel <-> cell conversion
//! - `FreeObjectTracker` - Off-grid objects anchored to the origin
//! - `Direction` - Compass neighbors used by autotiling

pub mod camera;
mod catalog;
pub mod direction;
mod error;
mod grid;
mod objects;
mod tile;

pub use camera::{cell_to_pixel, pixel_to_cell, CameraOrigin, TILE_SIZE};
pub use catalog::{Anchor, ItemCatalog, ItemCategory, ItemId, ItemInfo, ObjectBucket};
pub use direction::{pattern_string, Direction};
pub use error::{CatalogError, MapError};
pub use grid::SparseGridStore;
pub use objects::{DragState, FreeObject, FreeObjectTracker};
pub use tile::{AttachedObject, TileState, WaterVariant};

// Math types used throughout the public API
pub use bevy::math::{IVec2, Vec2};
