//! Layered level export for mapmaker
//!
//! Converts the sparse grid store plus the free objects into six placement
//! layers keyed by normalized pixel position, ready for a playback stage:
//!
//! | Layer                | Position                    | Variant                     |
//! |----------------------|-----------------------------|-----------------------------|
//! | `water`              | cell top-left               | `top` / `bottom`            |
//! | `terrain`            | cell top-left               | neighbor pattern or `"X"`   |
//! | `coins`              | cell center                 | item id                     |
//! | `enemies`            | cell bottom-left            | item id                     |
//! | `foreground_objects` | cell top-left + offset      | item id                     |
//! | `background_objects` | cell top-left + offset      | item id                     |
//!
//! Positions are shifted so the minimum occupied grid cell maps to `(0, 0)`.
//!
//! # Example
//!
//! ```rust,ignore
//! use mapmaker_export::GridSerializer;
//!
//! let layers = GridSerializer::new(&catalog, &variants, TILE_SIZE)
//!     .export(&store, &objects, origin.position());
//! std::fs::write("level.json", layers.to_json()?)?;
//! ```

mod layers;
mod serializer;

pub use layers::{ExportLayers, PixelPos, Placements};
pub use serializer::{export_level, GridSerializer};

pub use mapmaker_core::WaterVariant;
