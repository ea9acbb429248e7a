//! # mapmaker
//!
//! Level-design data engine: a sparse, unbounded tile grid with neighbor
//! autotiling, free objects anchored to a pannable origin, and a layered
//! export for a playback stage.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mapmaker::prelude::*;
//!
//! let mut session = EditorSession::standard()?;
//! session.apply(EditCommand::Paint(Vec2::new(10.0, 10.0)))?;
//! session.apply(EditCommand::Paint(Vec2::new(80.0, 10.0)))?;
//! std::fs::write("level.json", session.export_json()?)?;
//! ```
//!
//! ## Features
//!
//! - `editor` (default) - Includes the editing session, settings and commands
//!
//! ## Crate Structure
//!
//! This umbrella crate re-exports all mapmaker_* sub-crates:
//!
//! - [`core`] - Catalog, grid store, camera origin, free objects
//! - [`autotile`] - Neighbor patterns and terrain variants
//! - [`export`] - Layered level export
//! - [`editor`] - Editing session (requires `editor` feature)

// =============================================================================
// Core module - fundamental data structures
// =============================================================================

/// Core data types for a level being edited.
///
/// - [`ItemCatalog`] - Metadata per placeable item id
/// - [`SparseGridStore`] - Cell to tile state map
/// - [`FreeObjectTracker`] - Off-grid objects
/// - [`CameraOrigin`] - Pannable origin and pixel/cell conversion
pub mod core {
    pub use mapmaker_core::*;
}

pub use mapmaker_core::{
    cell_to_pixel, pixel_to_cell, Anchor, CameraOrigin, CatalogError, Direction, FreeObject,
    FreeObjectTracker, ItemCatalog, ItemCategory, ItemId, ItemInfo, MapError, ObjectBucket,
    SparseGridStore, TileState, WaterVariant, TILE_SIZE,
};

// =============================================================================
// Autotile module
// =============================================================================

/// Neighbor-pattern autotiling.
pub mod autotile {
    pub use mapmaker_autotile::*;
}

pub use mapmaker_autotile::{refresh_all, refresh_neighborhood, TerrainVariants};

// =============================================================================
// Export module
// =============================================================================

/// Layered level export.
pub mod export {
    pub use mapmaker_export::*;
}

pub use mapmaker_export::{export_level, ExportLayers, GridSerializer};

// =============================================================================
// Editor module (optional)
// =============================================================================

/// Editing session driven by pointer commands.
#[cfg(feature = "editor")]
pub mod editor {
    pub use mapmaker_editor::*;
}

#[cfg(feature = "editor")]
pub use mapmaker_editor::{EditCommand, EditorSession, EditorSettings};

/// Convenient imports for typical usage
///
/// ```rust,ignore
/// use mapmaker::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        export_level, ExportLayers, IVec2, ItemCatalog, ItemCategory, ItemId, MapError,
        SparseGridStore, TerrainVariants, Vec2, WaterVariant,
    };

    #[cfg(feature = "editor")]
    pub use crate::{EditCommand, EditorSession, EditorSettings};
}

pub use mapmaker_core::{IVec2, Vec2};
