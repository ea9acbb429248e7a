//! Free objects placed off-grid, anchored to the camera origin

use crate::{Anchor, ItemCatalog, ItemId, MapError};
use bevy::math::Vec2;
use uuid::Uuid;

/// Drag lifecycle of a free object
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Following the pointer; `pointer_offset` is `pointer - position` at drag start
    Dragging { pointer_offset: Vec2 },
}

/// An object placed independently of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct FreeObject {
    /// Unique identifier for this instance
    pub id: Uuid,
    pub item_id: ItemId,
    /// Displayed screen-space anchor
    pub position: Vec2,
    /// `position - origin` at the last settle; the persistent position
    pub origin_distance: Vec2,
    pub drag: DragState,
    /// Half of the catalog pick size
    pub half_extent: Vec2,
    /// Fixed anchors cannot be removed
    pub anchor: Option<Anchor>,
}

impl FreeObject {
    /// Whether the pointer is inside this object's pick box
    pub fn contains(&self, pointer: Vec2) -> bool {
        let delta = (pointer - self.position).abs();
        delta.x <= self.half_extent.x && delta.y <= self.half_extent.y
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn is_protected(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Owns every free object in the level, in draw order (last is topmost)
#[derive(Debug, Clone, Default)]
pub struct FreeObjectTracker {
    objects: Vec<FreeObject>,
}

impl FreeObjectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new object at a pixel position.
    ///
    /// Its persistent position is recorded as the distance from `origin`.
    pub fn place(
        &mut self,
        catalog: &ItemCatalog,
        position: Vec2,
        item_id: ItemId,
        origin: Vec2,
    ) -> Result<Uuid, MapError> {
        let info = catalog.info(item_id)?;
        if info.category.is_grid_snapped() {
            return Err(MapError::NotFreeObject(item_id));
        }

        let id = Uuid::new_v4();
        self.objects.push(FreeObject {
            id,
            item_id,
            position,
            origin_distance: position - origin,
            drag: DragState::Idle,
            half_extent: Vec2::from_array(info.size) / 2.0,
            anchor: info.anchor,
        });
        Ok(id)
    }

    pub fn get(&self, id: Uuid) -> Option<&FreeObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Topmost object under the pointer
    pub fn object_at(&self, pointer: Vec2) -> Option<Uuid> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.contains(pointer))
            .map(|o| o.id)
    }

    /// First object of a given item id
    pub fn find_item(&self, item_id: ItemId) -> Option<&FreeObject> {
        self.objects.iter().find(|o| o.item_id == item_id)
    }

    /// Start dragging an object, remembering where the pointer grabbed it
    pub fn begin_drag(&mut self, id: Uuid, pointer: Vec2) -> Result<(), MapError> {
        let object = self
            .objects
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(MapError::UnknownObject(id))?;
        object.drag = DragState::Dragging {
            pointer_offset: pointer - object.position,
        };
        Ok(())
    }

    /// Move every dragging object with the pointer
    pub fn drag_to(&mut self, pointer: Vec2) {
        for object in &mut self.objects {
            if let DragState::Dragging { pointer_offset } = object.drag {
                object.position = pointer - pointer_offset;
            }
        }
    }

    /// Drop every dragging object and re-anchor it to the origin.
    /// Returns how many objects were released.
    pub fn end_drag(&mut self, origin: Vec2) -> usize {
        let mut released = 0;
        for object in &mut self.objects {
            if object.is_dragging() {
                object.drag = DragState::Idle;
                object.origin_distance = object.position - origin;
                released += 1;
            }
        }
        released
    }

    pub fn is_dragging(&self) -> bool {
        self.objects.iter().any(FreeObject::is_dragging)
    }

    /// Re-display every object relative to a moved origin.
    /// `origin_distance` is left untouched.
    pub fn follow_origin(&mut self, origin: Vec2) {
        for object in &mut self.objects {
            object.position = origin + object.origin_distance;
        }
    }

    /// Delete an object. Fixed anchors are rejected.
    pub fn remove(&mut self, id: Uuid) -> Result<FreeObject, MapError> {
        let idx = self
            .objects
            .iter()
            .position(|o| o.id == id)
            .ok_or(MapError::UnknownObject(id))?;
        if self.objects[idx].is_protected() {
            return Err(MapError::ProtectedObjectRemoval {
                item_id: self.objects[idx].item_id,
            });
        }
        Ok(self.objects.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FreeObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
