//! Neighbor-pattern autotiling for mapmaker
//!
//! After every grid edit, the edited cell and its eight neighbors get their
//! derived state rebuilt: the ordered list of directions whose neighbor
//! cell exists, whatever it holds, and whether a water cell has more water stacked on top of it. The joined
//! pattern string is the key into the renderer's terrain variant table.
//!
//! # Example
//!
//! ```rust,ignore
//! use mapmaker_autotile::{refresh_neighborhood, TerrainVariants};
//! use mapmaker_core::{IVec2, ItemCatalog, SparseGridStore};
//!
//! let catalog = ItemCatalog::standard();
//! let mut store = SparseGridStore::new();
//!
//! store.add_id(&catalog, IVec2::new(0, 0), 2)?;
//! refresh_neighborhood(&mut store, IVec2::new(0, 0));
//! store.add_id(&catalog, IVec2::new(1, 0), 2)?;
//! refresh_neighborhood(&mut store, IVec2::new(1, 0));
//!
//! let pattern = store.get(IVec2::new(0, 0)).unwrap().pattern_string();
//! assert_eq!(TerrainVariants::any().resolve(&pattern), "C");
//! ```

pub mod resolver;
pub mod variants;

pub use resolver::{neighbor_pattern, neighborhood, refresh_all, refresh_cell, refresh_neighborhood};
pub use variants::{TerrainVariants, FALLBACK_VARIANT};

// Re-export the pattern primitives from mapmaker_core
pub use mapmaker_core::direction::{parse_pattern, pattern_string, Direction};

// Re-export mapmaker_core
pub use mapmaker_core;
