//! Conversion of the live editing state into [`ExportLayers`]

use crate::{ExportLayers, PixelPos};
use bevy::log::{info, warn};
use mapmaker_autotile::TerrainVariants;
use mapmaker_core::{
    cell_to_pixel, pixel_to_cell, FreeObjectTracker, IVec2, ItemCatalog, SparseGridStore,
    TileState, Vec2,
};
use std::collections::BTreeMap;

/// Reads the grid store and free objects and produces normalized layers.
///
/// Exporting never mutates its inputs: free objects are attached to a
/// working copy of the occupied cells, not to the store itself.
#[derive(Debug, Clone, Copy)]
pub struct GridSerializer<'a> {
    pub catalog: &'a ItemCatalog,
    pub variants: &'a TerrainVariants,
    /// Tile edge length in pixels
    pub tile_size: f32,
}

impl<'a> GridSerializer<'a> {
    pub fn new(catalog: &'a ItemCatalog, variants: &'a TerrainVariants, tile_size: f32) -> Self {
        Self {
            catalog,
            variants,
            tile_size,
        }
    }

    /// Cell offset subtracted from every cell so the minimum occupied
    /// column and row land on zero. Zero when nothing is occupied.
    ///
    /// Takes the working copy from [`Self::attachments`], so cells holding
    /// only free objects count as occupied.
    pub fn normalization_offset(cells: &BTreeMap<(i32, i32), TileState>) -> IVec2 {
        cells
            .keys()
            .map(|&(x, y)| IVec2::new(x, y))
            .reduce(IVec2::min)
            .unwrap_or(IVec2::ZERO)
    }

    /// Working copy of the occupied cells with every free object attached
    /// to the cell under it, keyed by `(column, row)`.
    pub fn attachments(
        &self,
        store: &SparseGridStore,
        objects: &FreeObjectTracker,
        origin: Vec2,
    ) -> BTreeMap<(i32, i32), TileState> {
        let mut cells: BTreeMap<(i32, i32), TileState> = store
            .iter()
            .map(|(cell, tile)| ((cell.x, cell.y), tile.clone()))
            .collect();

        for object in objects.iter() {
            let cell = pixel_to_cell(object.position, origin, self.tile_size);
            let offset = object.position - cell_to_pixel(cell, origin, self.tile_size);
            cells
                .entry((cell.x, cell.y))
                .or_default()
                .attach(object.item_id, offset);
        }

        cells
    }

    /// Produce the layered export
    pub fn export(
        &self,
        store: &SparseGridStore,
        objects: &FreeObjectTracker,
        origin: Vec2,
    ) -> ExportLayers {
        let cells = self.attachments(store, objects, origin);
        let normalize = Self::normalization_offset(&cells);
        let tile = self.tile_size;
        let mut layers = ExportLayers::new();

        for ((col, row), state) in cells {
            let corner = Vec2::new((col - normalize.x) as f32, (row - normalize.y) as f32) * tile;
            let (x, y) = pixel_pos(corner);

            if let Some(water) = state.water_variant() {
                layers.water.insert((x, y), water);
            }
            if state.has_terrain {
                let pattern = state.pattern_string();
                layers
                    .terrain
                    .insert((x, y), self.variants.resolve(&pattern).to_string());
            }
            if let Some(coin) = state.coin {
                layers
                    .coins
                    .insert(pixel_pos(corner + Vec2::splat(tile / 2.0)), coin);
            }
            if let Some(enemy) = state.enemy {
                layers
                    .enemies
                    .insert(pixel_pos(corner + Vec2::new(0.0, tile)), enemy);
            }

            for attached in &state.attached_objects {
                let Some(bucket) = self
                    .catalog
                    .get(attached.item_id)
                    .and_then(|info| info.category.bucket())
                else {
                    warn!(
                        "Skipping free object with item {} that is not a free object in the catalog",
                        attached.item_id
                    );
                    continue;
                };
                layers
                    .objects_mut(bucket)
                    .insert(pixel_pos(corner + attached.offset), attached.item_id);
            }
        }

        info!(
            "Exported {} placements from {} cells and {} free objects",
            layers.len(),
            store.len(),
            objects.len()
        );
        layers
    }
}

/// Whole-pixel position, rounded down
fn pixel_pos(position: Vec2) -> PixelPos {
    let position = position.floor().as_ivec2();
    (position.x, position.y)
}

/// Export the level in one call. See [`GridSerializer::export`].
pub fn export_level(
    store: &SparseGridStore,
    objects: &FreeObjectTracker,
    catalog: &ItemCatalog,
    variants: &TerrainVariants,
    origin: Vec2,
    tile_size: f32,
) -> ExportLayers {
    GridSerializer::new(catalog, variants, tile_size).export(store, objects, origin)
}
