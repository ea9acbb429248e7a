//! Per-cell tile state

use crate::direction::{pattern_string, Direction};
use crate::{ItemCategory, ItemId};
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Visual variant of a water cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterVariant {
    /// Surface water, nothing above it
    Top,
    /// Another water cell sits directly north
    Bottom,
}

/// A free object attached to a cell, with its pixel offset from the cell's corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachedObject {
    pub item_id: ItemId,
    pub offset: Vec2,
}

/// Everything placed on one grid cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileState {
    pub has_terrain: bool,
    pub has_water: bool,
    /// Water cell with another water cell directly north of it
    pub water_stacked: bool,
    pub coin: Option<ItemId>,
    pub enemy: Option<ItemId>,
    /// Directions of occupied neighboring cells, in [`Direction::ALL`] order
    pub neighbor_pattern: Vec<Direction>,
    /// Free objects resolved onto this cell during export
    pub attached_objects: Vec<AttachedObject>,
}

impl TileState {
    /// Create a tile holding a single item of the given category
    pub fn with_item(category: ItemCategory, id: ItemId) -> Self {
        let mut tile = Self::default();
        tile.set_item(category, id);
        tile
    }

    /// Set the field matching `category`. Free-object categories are ignored.
    pub fn set_item(&mut self, category: ItemCategory, id: ItemId) {
        match category {
            ItemCategory::Terrain => self.has_terrain = true,
            ItemCategory::Water => self.has_water = true,
            ItemCategory::Coin => self.coin = Some(id),
            ItemCategory::Enemy => self.enemy = Some(id),
            ItemCategory::ForegroundObject | ItemCategory::BackgroundObject => {}
        }
    }

    /// Clear the field matching `category`
    pub fn clear_item(&mut self, category: ItemCategory) {
        match category {
            ItemCategory::Terrain => self.has_terrain = false,
            ItemCategory::Water => {
                self.has_water = false;
                self.water_stacked = false;
            }
            ItemCategory::Coin => self.coin = None,
            ItemCategory::Enemy => self.enemy = None,
            ItemCategory::ForegroundObject | ItemCategory::BackgroundObject => {}
        }
    }

    /// A tile with nothing placed on it. Derived autotile state and
    /// attachments do not count.
    pub fn is_empty(&self) -> bool {
        !self.has_terrain && !self.has_water && self.coin.is_none() && self.enemy.is_none()
    }

    /// Joined neighbor pattern, the terrain variant lookup key
    pub fn pattern_string(&self) -> String {
        pattern_string(&self.neighbor_pattern)
    }

    /// Water variant, if this tile holds water
    pub fn water_variant(&self) -> Option<WaterVariant> {
        if !self.has_water {
            return None;
        }
        Some(if self.water_stacked {
            WaterVariant::Bottom
        } else {
            WaterVariant::Top
        })
    }

    /// Attach a free object, skipping exact duplicates
    pub fn attach(&mut self, item_id: ItemId, offset: Vec2) {
        let attached = AttachedObject { item_id, offset };
        if !self.attached_objects.contains(&attached) {
            self.attached_objects.push(attached);
        }
    }
}
