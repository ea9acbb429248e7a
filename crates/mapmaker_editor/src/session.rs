//! The editing session: one level being built with the pointer

use crate::{EditorSettings, PlacementCooldown};
use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;
use mapmaker_autotile::{refresh_all, refresh_neighborhood};
use mapmaker_core::{
    Anchor, CameraOrigin, FreeObject, FreeObjectTracker, IVec2, ItemCatalog, ItemId, MapError,
    SparseGridStore, Vec2,
};
use mapmaker_export::{export_level, ExportLayers};
use std::time::Duration;
use uuid::Uuid;

/// Item selected when a session starts (terrain)
pub const DEFAULT_SELECTION: ItemId = 2;

/// Result of a paint action at the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// A grid item was written to this cell
    Painted(IVec2),
    /// A free object was placed
    Placed(Uuid),
    /// Nothing changed: same cell as the last paint, cooldown, active drag,
    /// or a fixed anchor selected
    Unchanged,
}

/// Result of an erase action at the pointer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EraseOutcome {
    pub removed_object: Option<FreeObject>,
    /// Cell that had the selected category cleared
    pub cleared_cell: Option<IVec2>,
}

/// Editing state for one level.
///
/// Every grid mutation is followed by a refresh of the 3x3 neighborhood
/// around the edited cell, so derived autotile state is always current.
#[derive(Debug, Clone, Resource)]
pub struct EditorSession {
    settings: EditorSettings,
    catalog: ItemCatalog,
    store: SparseGridStore,
    objects: FreeObjectTracker,
    camera: CameraOrigin,
    cooldown: PlacementCooldown,
    selected: ItemId,
    /// Cell painted last during the current stroke
    last_cell: Option<IVec2>,
}

impl EditorSession {
    /// Create a session and place the fixed anchors the catalog defines
    pub fn new(settings: EditorSettings, catalog: ItemCatalog) -> Result<Self, MapError> {
        let mut session = Self {
            cooldown: PlacementCooldown::new(settings.placement_cooldown()),
            selected: DEFAULT_SELECTION,
            settings,
            catalog,
            store: SparseGridStore::new(),
            objects: FreeObjectTracker::new(),
            camera: CameraOrigin::default(),
            last_cell: None,
        };

        if !session.catalog.contains(session.selected) {
            let first = session.selectable_ids().next();
            session.selected = first.unwrap_or(DEFAULT_SELECTION);
        }

        for (anchor, position) in [
            (Anchor::Player, session.settings.player_start()),
            (Anchor::Sky, session.settings.sky_start()),
        ] {
            let Some(item_id) = session.catalog.find_anchor(anchor).map(|info| info.id) else {
                continue;
            };
            session.objects.place(
                &session.catalog,
                position,
                item_id,
                session.camera.position(),
            )?;
        }

        info!(
            "Started editing session with {} catalog items",
            session.catalog.len()
        );
        Ok(session)
    }

    /// Session with default settings and the stock palette
    pub fn standard() -> Result<Self, MapError> {
        Self::new(EditorSettings::default(), ItemCatalog::standard())
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &SparseGridStore {
        &self.store
    }

    pub fn objects(&self) -> &FreeObjectTracker {
        &self.objects
    }

    pub fn camera(&self) -> &CameraOrigin {
        &self.camera
    }

    pub fn origin(&self) -> Vec2 {
        self.camera.position()
    }

    pub fn selected(&self) -> ItemId {
        self.selected
    }

    pub fn tile_size(&self) -> f32 {
        self.settings.tile_size
    }

    /// Cell under a screen pixel
    pub fn cell_at(&self, pointer: Vec2) -> IVec2 {
        self.camera.pixel_to_cell(pointer, self.tile_size())
    }

    // ------------------------------------------------------------------
    // Grid edits
    // ------------------------------------------------------------------

    /// Add a grid item to a cell and refresh its neighborhood
    pub fn add_tile(&mut self, cell: IVec2, item_id: ItemId) -> Result<(), MapError> {
        self.store.add_id(&self.catalog, cell, item_id)?;
        let refreshed = refresh_neighborhood(&mut self.store, cell);
        debug!(
            "Added item {} at {:?}, refreshed {} cells",
            item_id, cell, refreshed
        );
        Ok(())
    }

    /// Clear the item's category from a cell and refresh its neighborhood.
    /// Returns `Ok(false)` if the cell was not occupied.
    pub fn remove_tile(&mut self, cell: IVec2, item_id: ItemId) -> Result<bool, MapError> {
        if !self.store.remove_id(&self.catalog, cell, item_id)? {
            return Ok(false);
        }
        let refreshed = refresh_neighborhood(&mut self.store, cell);
        debug!(
            "Removed item {} at {:?}, refreshed {} cells",
            item_id, cell, refreshed
        );
        Ok(true)
    }

    /// Replace the grid with loaded tiles, then rebuild all derived state
    pub fn load_tiles<I>(&mut self, tiles: I) -> Result<usize, MapError>
    where
        I: IntoIterator<Item = (IVec2, ItemId)>,
    {
        let mut store = SparseGridStore::new();
        for (cell, item_id) in tiles {
            store.add_id(&self.catalog, cell, item_id)?;
        }
        let refreshed = refresh_all(&mut store);
        self.store = store;
        info!("Loaded {} cells into the editing session", refreshed);
        Ok(refreshed)
    }

    // ------------------------------------------------------------------
    // Free objects
    // ------------------------------------------------------------------

    /// Place a free object at a screen position.
    ///
    /// Returns `Ok(None)` while the placement cooldown is active.
    pub fn place_object(&mut self, position: Vec2, item_id: ItemId) -> Result<Option<Uuid>, MapError> {
        if self.cooldown.is_active() {
            return Ok(None);
        }
        let id = self
            .objects
            .place(&self.catalog, position, item_id, self.camera.position())?;
        self.cooldown.trigger();
        debug!("Placed object {} (item {}) at {:?}", id, item_id, position);
        Ok(Some(id))
    }

    /// Delete a free object. The player and sky anchors are refused.
    pub fn remove_object(&mut self, id: Uuid) -> Result<FreeObject, MapError> {
        match self.objects.remove(id) {
            Ok(object) => {
                debug!("Removed object {} (item {})", id, object.item_id);
                Ok(object)
            }
            Err(e) => {
                warn!("Could not remove object {}: {}", id, e);
                Err(e)
            }
        }
    }

    /// Start dragging the topmost object under the pointer, if any
    pub fn begin_drag(&mut self, pointer: Vec2) -> Result<Option<Uuid>, MapError> {
        let Some(id) = self.objects.object_at(pointer) else {
            return Ok(None);
        };
        self.objects.begin_drag(id, pointer)?;
        Ok(Some(id))
    }

    pub fn drag_to(&mut self, pointer: Vec2) {
        self.objects.drag_to(pointer);
    }

    /// Drop dragged objects, anchoring them to the current origin
    pub fn end_drag(&mut self) -> usize {
        self.objects.end_drag(self.camera.position())
    }

    // ------------------------------------------------------------------
    // Camera
    // ------------------------------------------------------------------

    pub fn begin_pan(&mut self, pointer: Vec2) {
        self.camera.begin_pan(pointer);
    }

    /// Follow the pointer while panning; free objects move with the origin
    pub fn drag_pan(&mut self, pointer: Vec2) -> bool {
        let Some(delta) = self.camera.pan_delta(pointer) else {
            return false;
        };
        self.pan_by(delta);
        delta != Vec2::ZERO
    }

    /// Move the origin by a delta, carrying free objects along
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.camera.pan_by(delta);
        self.objects.follow_origin(self.camera.position());
    }

    pub fn end_pan(&mut self) {
        self.camera.end_pan();
    }

    pub fn is_panning(&self) -> bool {
        self.camera.is_panning()
    }

    /// Mouse wheel scroll, vertical when a modifier is held
    pub fn scroll(&mut self, wheel: f32, vertical: bool) {
        self.pan_by(CameraOrigin::scroll_delta(
            wheel,
            vertical,
            self.settings.scroll_step,
        ));
    }

    /// Screen offset of the support grid lines
    pub fn grid_line_offset(&self) -> Vec2 {
        self.camera.grid_line_offset(self.tile_size())
    }

    // ------------------------------------------------------------------
    // Pointer actions
    // ------------------------------------------------------------------

    /// Paint the selected item at the pointer
    pub fn paint_at(&mut self, pointer: Vec2) -> Result<PaintOutcome, MapError> {
        let item_id = self.selected;
        if self.objects.is_dragging() || self.catalog.anchor_of(item_id).is_some() {
            return Ok(PaintOutcome::Unchanged);
        }

        if self.catalog.is_grid_snapped(item_id)? {
            let cell = self.cell_at(pointer);
            if self.last_cell == Some(cell) {
                return Ok(PaintOutcome::Unchanged);
            }
            self.add_tile(cell, item_id)?;
            self.last_cell = Some(cell);
            Ok(PaintOutcome::Painted(cell))
        } else {
            Ok(self
                .place_object(pointer, item_id)?
                .map_or(PaintOutcome::Unchanged, PaintOutcome::Placed))
        }
    }

    /// Finish a paint stroke so the next paint may hit the same cell again
    pub fn end_stroke(&mut self) {
        self.last_cell = None;
    }

    /// Erase at the pointer: the object under it, then the selected
    /// category from the cell under it.
    ///
    /// A fixed anchor under the pointer fails the whole action.
    pub fn erase_at(&mut self, pointer: Vec2) -> Result<EraseOutcome, MapError> {
        let mut outcome = EraseOutcome::default();

        if let Some(id) = self.objects.object_at(pointer) {
            outcome.removed_object = Some(self.remove_object(id)?);
        }

        if self.catalog.is_grid_snapped(self.selected)? {
            let cell = self.cell_at(pointer);
            if self.remove_tile(cell, self.selected)? {
                outcome.cleared_cell = Some(cell);
            }
        }

        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Palette
    // ------------------------------------------------------------------

    /// Ids the palette can select; fixed anchors are not selectable
    pub fn selectable_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.catalog
            .ids()
            .filter(|&id| self.catalog.anchor_of(id).is_none())
    }

    pub fn select(&mut self, item_id: ItemId) -> Result<(), MapError> {
        self.catalog.info(item_id)?;
        self.selected = item_id;
        Ok(())
    }

    /// Select the next selectable id, staying on the last one
    pub fn select_next(&mut self) -> ItemId {
        let current = self.selected;
        if let Some(next) = self.selectable_ids().find(|&id| id > current) {
            self.selected = next;
        }
        self.selected
    }

    /// Select the previous selectable id, staying on the first one
    pub fn select_previous(&mut self) -> ItemId {
        let current = self.selected;
        if let Some(previous) = self.selectable_ids().filter(|&id| id < current).last() {
            self.selected = previous;
        }
        self.selected
    }

    // ------------------------------------------------------------------
    // Time and export
    // ------------------------------------------------------------------

    /// Advance the placement cooldown
    pub fn tick(&mut self, delta: Duration) {
        self.cooldown.tick(delta);
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown.is_active()
    }

    /// Export the level as layered placements
    pub fn export(&self) -> ExportLayers {
        export_level(
            &self.store,
            &self.objects,
            &self.catalog,
            &self.settings.terrain_variants,
            self.camera.position(),
            self.settings.tile_size,
        )
    }

    /// Export the level as pretty JSON
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.export().to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapmaker_core::{Direction, ObjectBucket, WaterVariant};

    fn session() -> EditorSession {
        EditorSession::standard().unwrap()
    }

    /// Screen pixel inside a cell at the default origin
    fn px(x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32 * 64.0 + 10.0, y as f32 * 64.0 + 10.0)
    }

    #[test]
    fn test_new_session_places_anchors() {
        let session = session();
        assert_eq!(session.objects().len(), 2);
        assert_eq!(session.selected(), DEFAULT_SELECTION);

        let player = session.objects().find_item(0).unwrap();
        assert_eq!(player.position, session.settings().player_start());
        assert!(player.is_protected());
        assert!(session.objects().find_item(1).unwrap().is_protected());
    }

    #[test]
    fn test_anchors_cannot_be_removed() {
        let mut session = session();
        let player = session.objects().find_item(0).unwrap().id;

        let result = session.remove_object(player);
        assert_eq!(result, Err(MapError::ProtectedObjectRemoval { item_id: 0 }));
        assert_eq!(session.objects().len(), 2);

        let sky = session.settings().sky_start();
        assert!(matches!(
            session.erase_at(sky),
            Err(MapError::ProtectedObjectRemoval { item_id: 1 })
        ));
    }

    #[test]
    fn test_add_tile_refreshes_neighbors() {
        let mut session = session();
        session.add_tile(IVec2::new(0, 0), 2).unwrap();
        session.add_tile(IVec2::new(1, 0), 2).unwrap();

        let left = session.store().get(IVec2::new(0, 0)).unwrap();
        assert_eq!(left.neighbor_pattern, vec![Direction::East]);

        assert!(session.remove_tile(IVec2::new(1, 0), 2).unwrap());
        let left = session.store().get(IVec2::new(0, 0)).unwrap();
        assert!(left.neighbor_pattern.is_empty());
        assert!(!session.remove_tile(IVec2::new(1, 0), 2).unwrap());
    }

    #[test]
    fn test_paint_stroke_dedupes_cells() {
        let mut session = session();
        assert_eq!(
            session.paint_at(px(3, 3)).unwrap(),
            PaintOutcome::Painted(IVec2::new(3, 3))
        );
        assert_eq!(session.paint_at(px(3, 3)).unwrap(), PaintOutcome::Unchanged);
        assert_eq!(
            session.paint_at(px(4, 3)).unwrap(),
            PaintOutcome::Painted(IVec2::new(4, 3))
        );

        session.end_stroke();
        session.select(5).unwrap();
        assert_eq!(
            session.paint_at(px(4, 3)).unwrap(),
            PaintOutcome::Painted(IVec2::new(4, 3))
        );
        assert_eq!(session.store().get(IVec2::new(4, 3)).unwrap().coin, Some(5));
    }

    #[test]
    fn test_placement_cooldown() {
        let mut session = session();
        session.select(11).unwrap();

        let first = session.paint_at(Vec2::new(600.0, 100.0)).unwrap();
        assert!(matches!(first, PaintOutcome::Placed(_)));
        assert_eq!(
            session.place_object(Vec2::new(700.0, 100.0), 11),
            Ok(None)
        );

        session.tick(Duration::from_millis(399));
        assert!(session.is_cooling_down());
        session.tick(Duration::from_millis(1));
        assert!(session.place_object(Vec2::new(700.0, 100.0), 11).unwrap().is_some());
        assert_eq!(session.objects().len(), 4);
    }

    #[test]
    fn test_place_object_rejects_grid_items() {
        let mut session = session();
        assert_eq!(
            session.place_object(Vec2::ZERO, 2),
            Err(MapError::NotFreeObject(2))
        );
        assert!(!session.is_cooling_down());
    }

    #[test]
    fn test_anchor_selection_does_not_paint() {
        let mut session = session();
        session.select(0).unwrap();
        assert_eq!(session.paint_at(px(1, 1)).unwrap(), PaintOutcome::Unchanged);
        assert!(session.store().is_empty());
        assert_eq!(session.objects().len(), 2);
    }

    #[test]
    fn test_pan_moves_objects_with_origin() {
        let mut session = session();
        let id = session.place_object(Vec2::new(500.0, 300.0), 11).unwrap().unwrap();

        session.begin_pan(Vec2::new(100.0, 100.0));
        assert!(session.is_panning());
        assert!(session.drag_pan(Vec2::new(150.0, 100.0)));
        session.end_pan();
        assert!(!session.is_panning());

        assert_eq!(session.origin(), Vec2::new(50.0, 0.0));
        let object = session.objects().get(id).unwrap();
        assert_eq!(object.position, Vec2::new(550.0, 300.0));
        assert_eq!(object.origin_distance, Vec2::new(500.0, 300.0));
        assert!(!session.drag_pan(Vec2::new(300.0, 300.0)));
    }

    #[test]
    fn test_zero_sum_pan_restores_objects() {
        let mut session = session();
        let id = session.place_object(Vec2::new(500.0, 300.0), 11).unwrap().unwrap();
        let player_start = session.settings().player_start();

        let deltas = [
            Vec2::new(64.0, 0.0),
            Vec2::new(-10.5, 33.0),
            Vec2::new(0.0, -100.0),
            Vec2::new(-53.5, 67.0),
        ];
        for delta in deltas {
            session.pan_by(delta);
            for object in session.objects().iter() {
                assert_eq!(object.position, session.origin() + object.origin_distance);
            }
        }

        assert_eq!(session.origin(), Vec2::ZERO);
        assert_eq!(
            session.objects().get(id).unwrap().position,
            Vec2::new(500.0, 300.0)
        );
        assert_eq!(session.objects().find_item(0).unwrap().position, player_start);
    }

    #[test]
    fn test_scroll() {
        let mut session = session();
        session.scroll(1.0, false);
        assert_eq!(session.origin(), Vec2::new(-50.0, 0.0));
        session.scroll(-2.0, true);
        assert_eq!(session.origin(), Vec2::new(-50.0, 100.0));
        assert_eq!(session.grid_line_offset(), Vec2::new(14.0, 36.0));

        let player = session.objects().find_item(0).unwrap();
        assert_eq!(
            player.position,
            session.settings().player_start() + Vec2::new(-50.0, 100.0)
        );
    }

    #[test]
    fn test_drag_suppresses_painting() {
        let mut session = session();
        session.select(11).unwrap();
        let id = session.place_object(Vec2::new(500.0, 300.0), 11).unwrap().unwrap();
        session.tick(Duration::from_secs(1));

        assert_eq!(session.begin_drag(Vec2::new(510.0, 310.0)).unwrap(), Some(id));
        assert_eq!(session.paint_at(Vec2::new(800.0, 300.0)).unwrap(), PaintOutcome::Unchanged);

        session.drag_to(Vec2::new(610.0, 330.0));
        assert_eq!(session.end_drag(), 1);
        let object = session.objects().get(id).unwrap();
        assert_eq!(object.position, Vec2::new(600.0, 320.0));
        assert_eq!(object.origin_distance, Vec2::new(600.0, 320.0));

        assert_eq!(session.begin_drag(Vec2::new(5000.0, 5000.0)).unwrap(), None);
    }

    #[test]
    fn test_erase_uses_selected_category() {
        let mut session = session();
        session.add_tile(IVec2::new(2, 2), 2).unwrap();
        session.add_tile(IVec2::new(2, 2), 4).unwrap();

        session.select(5).unwrap();
        let outcome = session.erase_at(px(2, 2)).unwrap();
        assert_eq!(outcome.cleared_cell, Some(IVec2::new(2, 2)));
        let tile = session.store().get(IVec2::new(2, 2)).unwrap();
        assert!(tile.has_terrain);
        assert_eq!(tile.coin, None);

        session.select(2).unwrap();
        session.erase_at(px(2, 2)).unwrap();
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_erase_removes_object_under_pointer() {
        let mut session = session();
        let id = session.place_object(Vec2::new(900.0, 100.0), 15).unwrap().unwrap();

        let outcome = session.erase_at(Vec2::new(900.0, 100.0)).unwrap();
        assert_eq!(outcome.removed_object.map(|o| o.id), Some(id));
        assert_eq!(outcome.cleared_cell, None);
        assert_eq!(session.objects().len(), 2);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut session = session();
        assert_eq!(session.select_previous(), 2);
        for _ in 0..30 {
            session.select_next();
        }
        assert_eq!(session.selected(), 18);
        assert_eq!(session.select_previous(), 17);
        assert_eq!(session.select(99), Err(MapError::UnknownItemId(99)));
        assert_eq!(session.selected(), 17);
    }

    #[test]
    fn test_load_tiles_refreshes_everything() {
        let mut session = session();
        session.add_tile(IVec2::new(9, 9), 2).unwrap();

        let loaded = session
            .load_tiles([(IVec2::new(0, 0), 3), (IVec2::new(0, 1), 3), (IVec2::new(1, 0), 2)])
            .unwrap();
        assert_eq!(loaded, 3);
        assert!(!session.store().contains(IVec2::new(9, 9)));
        assert!(session.store().get(IVec2::new(0, 1)).unwrap().water_stacked);

        assert_eq!(
            session.load_tiles([(IVec2::new(0, 0), 42)]),
            Err(MapError::UnknownItemId(42))
        );
        assert_eq!(session.store().len(), 3);
    }

    #[test]
    fn test_export() {
        let mut session = session();
        session.add_tile(IVec2::new(1, 1), 3).unwrap();
        session.add_tile(IVec2::new(1, 2), 3).unwrap();
        session.add_tile(IVec2::new(2, 2), 8).unwrap();

        let layers = session.export();
        assert_eq!(layers.water.get(&(0, 0)), Some(&WaterVariant::Top));
        assert_eq!(layers.water.get(&(0, 64)), Some(&WaterVariant::Bottom));
        assert_eq!(layers.enemies.get(&(64, 128)), Some(&8));
        // Both anchors export as foreground objects
        assert_eq!(layers.objects(ObjectBucket::Foreground).len(), 2);

        let json = session.export_json().unwrap();
        assert_eq!(ExportLayers::from_json(&json).unwrap(), layers);
    }
}
