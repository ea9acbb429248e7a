//! Neighbor-pattern recomputation after grid edits
//!
//! A single add or remove changes what each of the eight surrounding cells
//! should render, so every edit is followed by a refresh of the 3x3
//! neighborhood around the edited cell. The refresh must run after the
//! triggering mutation has completed.

use bevy::log::trace;
use mapmaker_core::{Direction, IVec2, SparseGridStore};

/// The edited cell and its eight neighbors, row by row
pub fn neighborhood(cell: IVec2) -> impl Iterator<Item = IVec2> {
    (-1..=1).flat_map(move |dy| (-1..=1).map(move |dx| cell + IVec2::new(dx, dy)))
}

/// Directions whose neighbor satisfies `occupied`, in [`Direction::ALL`] order
pub fn neighbor_pattern<F>(cell: IVec2, occupied: F) -> Vec<Direction>
where
    F: Fn(IVec2) -> bool,
{
    Direction::ALL
        .into_iter()
        .filter(|d| occupied(cell + d.offset()))
        .collect()
}

/// Recompute the derived autotile state of one cell.
///
/// Clears and rebuilds the neighbor pattern from every neighbor present in
/// the store, whatever it holds, and sets `water_stacked` when
/// the cell and its north neighbor both hold water. Returns `false` if the
/// cell is not in the store.
pub fn refresh_cell(store: &mut SparseGridStore, cell: IVec2) -> bool {
    if !store.contains(cell) {
        return false;
    }

    let pattern = neighbor_pattern(cell, |n| store.contains(n));
    let stacked = store.has_water(cell) && store.has_water(cell + Direction::North.offset());

    if let Some(tile) = store.get_mut(cell) {
        tile.neighbor_pattern = pattern;
        tile.water_stacked = stacked;
    }
    true
}

/// Refresh every existing cell of the 3x3 neighborhood around `cell`.
/// Returns how many cells were refreshed.
pub fn refresh_neighborhood(store: &mut SparseGridStore, cell: IVec2) -> usize {
    let refreshed = neighborhood(cell)
        .filter(|&c| refresh_cell(store, c))
        .count();
    trace!("Refreshed {} cells around {}", refreshed, cell);
    refreshed
}

/// Refresh every cell in the store, e.g. after a bulk load
pub fn refresh_all(store: &mut SparseGridStore) -> usize {
    let cells: Vec<IVec2> = store.cells().collect();
    for &cell in &cells {
        refresh_cell(store, cell);
    }
    cells.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapmaker_core::ItemCatalog;

    const TERRAIN: u32 = 2;
    const WATER: u32 = 3;
    const COIN: u32 = 4;

    fn add(store: &mut SparseGridStore, catalog: &ItemCatalog, x: i32, y: i32, id: u32) {
        let cell = IVec2::new(x, y);
        store.add_id(catalog, cell, id).unwrap();
        refresh_neighborhood(store, cell);
    }

    fn pattern_at(store: &SparseGridStore, x: i32, y: i32) -> String {
        store.get(IVec2::new(x, y)).unwrap().pattern_string()
    }

    #[test]
    fn test_neighborhood_covers_3x3() {
        let cells: Vec<IVec2> = neighborhood(IVec2::new(5, 5)).collect();
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&IVec2::new(4, 4)));
        assert!(cells.contains(&IVec2::new(6, 6)));
        assert!(cells.contains(&IVec2::new(5, 5)));
    }

    #[test]
    fn test_corner_pattern_east_and_south() {
        let catalog = ItemCatalog::standard();
        let mut store = SparseGridStore::new();
        add(&mut store, &catalog, 0, 0, TERRAIN);
        add(&mut store, &catalog, 1, 0, TERRAIN);
        add(&mut store, &catalog, 0, 1, TERRAIN);

        let tile = store.get(IVec2::new(0, 0)).unwrap();
        assert_eq!(tile.neighbor_pattern, vec![Direction::East, Direction::South]);
        assert_eq!(pattern_at(&store, 0, 0), "CE");
        // (1,0) sees west and south-west, (0,1) sees north and north-east
        assert_eq!(pattern_at(&store, 1, 0), "FG");
        assert_eq!(pattern_at(&store, 0, 1), "AB");
    }

    #[test]
    fn test_removal_updates_neighbors() {
        let catalog = ItemCatalog::standard();
        let mut store = SparseGridStore::new();
        add(&mut store, &catalog, 0, 0, TERRAIN);
        add(&mut store, &catalog, 1, 0, TERRAIN);
        assert_eq!(pattern_at(&store, 0, 0), "C");

        store.remove_id(&catalog, IVec2::new(1, 0), TERRAIN).unwrap();
        refresh_neighborhood(&mut store, IVec2::new(1, 0));
        assert_eq!(pattern_at(&store, 0, 0), "");
    }

    #[test]
    fn test_any_occupied_neighbor_counts() {
        let catalog = ItemCatalog::standard();
        let mut store = SparseGridStore::new();
        add(&mut store, &catalog, 0, 0, TERRAIN);
        add(&mut store, &catalog, 1, 0, COIN);
        add(&mut store, &catalog, 0, -1, WATER);
        // Water to the north and a coin to the east both shape the terrain edge
        assert_eq!(pattern_at(&store, 0, 0), "AC");
        assert_eq!(pattern_at(&store, 1, 0), "GH");
        assert_eq!(pattern_at(&store, 0, -1), "DE");

        store.remove_id(&catalog, IVec2::new(1, 0), COIN).unwrap();
        refresh_neighborhood(&mut store, IVec2::new(1, 0));
        assert_eq!(pattern_at(&store, 0, 0), "A");
    }

    #[test]
    fn test_water_stacked() {
        let catalog = ItemCatalog::standard();
        let mut store = SparseGridStore::new();
        add(&mut store, &catalog, 2, 2, WATER);
        add(&mut store, &catalog, 2, 1, WATER);

        assert!(store.get(IVec2::new(2, 2)).unwrap().water_stacked);
        assert!(!store.get(IVec2::new(2, 1)).unwrap().water_stacked);

        store.remove_id(&catalog, IVec2::new(2, 1), WATER).unwrap();
        refresh_neighborhood(&mut store, IVec2::new(2, 1));
        assert!(!store.get(IVec2::new(2, 2)).unwrap().water_stacked);
    }

    #[test]
    fn test_pattern_is_deterministic() {
        let catalog = ItemCatalog::standard();
        let occupied = [(-1, -1), (0, -1), (1, 1), (-1, 0), (1, -1)];

        let mut forward = SparseGridStore::new();
        add(&mut forward, &catalog, 0, 0, TERRAIN);
        for (x, y) in occupied {
            add(&mut forward, &catalog, x, y, TERRAIN);
        }

        let mut backward = SparseGridStore::new();
        for (x, y) in occupied.iter().rev() {
            add(&mut backward, &catalog, *x, *y, TERRAIN);
        }
        add(&mut backward, &catalog, 0, 0, TERRAIN);

        assert_eq!(pattern_at(&forward, 0, 0), pattern_at(&backward, 0, 0));
        assert_eq!(pattern_at(&forward, 0, 0), "ABDGH");
    }

    #[test]
    fn test_refresh_all_matches_incremental() {
        let catalog = ItemCatalog::standard();
        let cells = [(0, 0), (1, 0), (2, 0), (1, 1), (3, 3)];

        let mut incremental = SparseGridStore::new();
        let mut bulk = SparseGridStore::new();
        for (x, y) in cells {
            add(&mut incremental, &catalog, x, y, TERRAIN);
            bulk.add_id(&catalog, IVec2::new(x, y), TERRAIN).unwrap();
        }
        assert_eq!(refresh_all(&mut bulk), cells.len());

        for (x, y) in cells {
            assert_eq!(pattern_at(&incremental, x, y), pattern_at(&bulk, x, y));
        }
    }

    #[test]
    fn test_refresh_missing_cell() {
        let mut store = SparseGridStore::new();
        assert!(!refresh_cell(&mut store, IVec2::ZERO));
        assert_eq!(refresh_neighborhood(&mut store, IVec2::ZERO), 0);
    }
}
