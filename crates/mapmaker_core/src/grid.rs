//! Sparse, unbounded tile grid keyed by cell coordinate

use crate::{ItemCatalog, ItemId, MapError, TileState};
use bevy::math::IVec2;
use std::collections::HashMap;

/// Mapping from cell coordinate to [`TileState`].
///
/// Only occupied cells are stored: a tile that becomes empty after a removal
/// is dropped immediately. Neighbor patterns are never recomputed here; run
/// the autotile refresh over the edited neighborhood after each edit.
#[derive(Debug, Clone, Default)]
pub struct SparseGridStore {
    tiles: HashMap<IVec2, TileState>,
}

impl SparseGridStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an item on a cell, creating the tile if the cell was empty.
    ///
    /// The item is looked up before anything is mutated; unknown ids and
    /// free-object ids leave the store untouched.
    pub fn add_id(&mut self, catalog: &ItemCatalog, cell: IVec2, id: ItemId) -> Result<(), MapError> {
        let category = catalog.category_of(id)?;
        if !category.is_grid_snapped() {
            return Err(MapError::NotGridSnapped(id));
        }

        self.tiles.entry(cell).or_default().set_item(category, id);
        Ok(())
    }

    /// Clear the field matching the item's category on a cell.
    ///
    /// Returns `Ok(false)` if the cell held nothing. The cell is removed
    /// from the store as soon as it becomes empty.
    pub fn remove_id(
        &mut self,
        catalog: &ItemCatalog,
        cell: IVec2,
        id: ItemId,
    ) -> Result<bool, MapError> {
        let category = catalog.category_of(id)?;
        if !category.is_grid_snapped() {
            return Err(MapError::NotGridSnapped(id));
        }

        let Some(tile) = self.tiles.get_mut(&cell) else {
            return Ok(false);
        };
        tile.clear_item(category);
        if tile.is_empty() {
            self.tiles.remove(&cell);
        }
        Ok(true)
    }

    /// Tile state at a cell
    pub fn get(&self, cell: IVec2) -> Option<&TileState> {
        self.tiles.get(&cell)
    }

    /// Mutable tile state, for derived-state refreshes
    pub fn get_mut(&mut self, cell: IVec2) -> Option<&mut TileState> {
        self.tiles.get_mut(&cell)
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        self.tiles.contains_key(&cell)
    }

    /// Whether a cell holds water
    pub fn has_water(&self, cell: IVec2) -> bool {
        self.tiles.get(&cell).is_some_and(|t| t.has_water)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate occupied cells (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &TileState)> {
        self.tiles.iter().map(|(cell, tile)| (*cell, tile))
    }

    /// Occupied cell coordinates (unordered)
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.tiles.keys().copied()
    }

    /// Remove every tile
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ItemCatalog {
        ItemCatalog::standard()
    }

    #[test]
    fn test_add_creates_tile() {
        let catalog = catalog();
        let mut store = SparseGridStore::new();
        store.add_id(&catalog, IVec2::new(3, -2), 2).unwrap();

        let tile = store.get(IVec2::new(3, -2)).unwrap();
        assert!(tile.has_terrain);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_last_item_deletes_cell() {
        let catalog = catalog();
        let mut store = SparseGridStore::new();
        let cell = IVec2::new(0, 0);
        store.add_id(&catalog, cell, 2).unwrap();
        store.add_id(&catalog, cell, 4).unwrap();

        assert_eq!(store.remove_id(&catalog, cell, 2), Ok(true));
        assert!(store.contains(cell));
        assert_eq!(store.remove_id(&catalog, cell, 5), Ok(true));
        assert!(!store.contains(cell));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_cell_is_not_an_error() {
        let catalog = catalog();
        let mut store = SparseGridStore::new();
        assert_eq!(store.remove_id(&catalog, IVec2::new(9, 9), 2), Ok(false));
    }

    #[test]
    fn test_remove_other_category_keeps_cell() {
        let catalog = catalog();
        let mut store = SparseGridStore::new();
        let cell = IVec2::new(1, 1);
        store.add_id(&catalog, cell, 3).unwrap();
        assert_eq!(store.remove_id(&catalog, cell, 2), Ok(true));
        assert!(store.has_water(cell));
    }

    #[test]
    fn test_unknown_id_leaves_store_unchanged() {
        let catalog = catalog();
        let mut store = SparseGridStore::new();
        let cell = IVec2::new(0, 0);
        store.add_id(&catalog, cell, 2).unwrap();

        assert_eq!(
            store.remove_id(&catalog, cell, 404),
            Err(MapError::UnknownItemId(404))
        );
        assert_eq!(
            store.add_id(&catalog, IVec2::new(5, 5), 404),
            Err(MapError::UnknownItemId(404))
        );
        assert_eq!(store.len(), 1);
        assert!(store.get(cell).is_some_and(|t| t.has_terrain));
    }

    #[test]
    fn test_free_object_ids_rejected() {
        let catalog = catalog();
        let mut store = SparseGridStore::new();
        assert_eq!(
            store.add_id(&catalog, IVec2::ZERO, 11),
            Err(MapError::NotGridSnapped(11))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_presence_matches_net_effect() {
        let catalog = catalog();
        let mut store = SparseGridStore::new();
        let cell = IVec2::new(-4, 7);
        let ops: [(bool, ItemId); 8] = [
            (true, 2),
            (true, 3),
            (false, 2),
            (true, 8),
            (false, 3),
            (true, 6),
            (false, 7),
            (false, 4),
        ];

        let mut tile = TileState::default();
        for (add, id) in ops {
            let category = catalog.category_of(id).unwrap();
            if add {
                store.add_id(&catalog, cell, id).unwrap();
                tile.set_item(category, id);
            } else {
                store.remove_id(&catalog, cell, id).unwrap();
                tile.clear_item(category);
            }
            assert_eq!(store.contains(cell), !tile.is_empty());
        }
        assert!(store.is_empty());
    }
}
