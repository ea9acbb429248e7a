//! Item catalog: static metadata for every placeable item id
//!
//! The catalog is the only place that knows what an item id *is*. The grid
//! store, the free-object tracker and the exporter all ask it for the
//! item's category before touching any state.

use crate::{CatalogError, MapError};
use bevy::log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Identifier of a placeable item
pub type ItemId = u32;

/// What kind of thing an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Terrain,
    Water,
    Coin,
    Enemy,
    /// Off-grid object drawn in front of the terrain
    ForegroundObject,
    /// Off-grid object drawn behind the terrain
    BackgroundObject,
}

impl ItemCategory {
    /// Grid-snapped items live in the sparse grid; everything else is a free object
    pub fn is_grid_snapped(&self) -> bool {
        matches!(
            self,
            ItemCategory::Terrain | ItemCategory::Water | ItemCategory::Coin | ItemCategory::Enemy
        )
    }

    /// The export bucket of a free object, `None` for grid items
    pub fn bucket(&self) -> Option<ObjectBucket> {
        match self {
            ItemCategory::ForegroundObject => Some(ObjectBucket::Foreground),
            ItemCategory::BackgroundObject => Some(ObjectBucket::Background),
            _ => None,
        }
    }
}

/// Draw bucket of a free object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectBucket {
    Foreground,
    Background,
}

/// Fixed objects that always exist in a level and can never be deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Player start position
    Player,
    /// Sky/horizon handle
    Sky,
}

fn default_size() -> [f32; 2] {
    [64.0, 64.0]
}

/// Metadata for one item id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    /// Set for the fixed player/sky objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    /// Hit-box size in pixels, used for picking free objects
    #[serde(default = "default_size")]
    pub size: [f32; 2],
}

impl ItemInfo {
    pub fn new(id: ItemId, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            anchor: None,
            size: default_size(),
        }
    }

    /// Mark this item as a fixed anchor
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Set the pick size in pixels
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = [width, height];
        self
    }
}

/// On-disk layout of a catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<ItemInfo>,
}

/// Lookup table from item id to [`ItemInfo`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, ItemInfo>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock palette: player and sky anchors, terrain, water, three
    /// coins, four enemies and eight palms split across both buckets.
    pub fn standard() -> Self {
        use ItemCategory::*;

        let items = [
            ItemInfo::new(0, "player", ForegroundObject)
                .with_anchor(Anchor::Player)
                .with_size(48.0, 56.0),
            ItemInfo::new(1, "sky", ForegroundObject)
                .with_anchor(Anchor::Sky)
                .with_size(32.0, 32.0),
            ItemInfo::new(2, "terrain", Terrain),
            ItemInfo::new(3, "water", Water),
            ItemInfo::new(4, "gold", Coin),
            ItemInfo::new(5, "silver", Coin),
            ItemInfo::new(6, "diamond", Coin),
            ItemInfo::new(7, "spikes", Enemy),
            ItemInfo::new(8, "tooth", Enemy),
            ItemInfo::new(9, "shell_left", Enemy),
            ItemInfo::new(10, "shell_right", Enemy),
            ItemInfo::new(11, "small_fg", ForegroundObject).with_size(76.0, 100.0),
            ItemInfo::new(12, "large_fg", ForegroundObject).with_size(76.0, 150.0),
            ItemInfo::new(13, "left_fg", ForegroundObject).with_size(110.0, 120.0),
            ItemInfo::new(14, "right_fg", ForegroundObject).with_size(110.0, 120.0),
            ItemInfo::new(15, "small_bg", BackgroundObject).with_size(76.0, 100.0),
            ItemInfo::new(16, "large_bg", BackgroundObject).with_size(76.0, 150.0),
            ItemInfo::new(17, "left_bg", BackgroundObject).with_size(110.0, 120.0),
            ItemInfo::new(18, "right_bg", BackgroundObject).with_size(110.0, 120.0),
        ];

        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    /// Build a catalog from a list of items, rejecting duplicate ids and
    /// anchors that are not free objects.
    pub fn from_items(items: impl IntoIterator<Item = ItemInfo>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for item in items {
            if item.anchor.is_some() && item.category.is_grid_snapped() {
                return Err(CatalogError::Invalid(format!(
                    "Item {} ('{}') is an anchor but is grid-snapped",
                    item.id, item.name
                )));
            }
            let id = item.id;
            if catalog.insert(item).is_some() {
                return Err(CatalogError::Invalid(format!("Duplicate item id {}", id)));
            }
        }
        Ok(catalog)
    }

    /// Insert or replace an item, returning the previous entry
    pub fn insert(&mut self, item: ItemInfo) -> Option<ItemInfo> {
        self.items.insert(item.id, item)
    }

    /// Get item metadata
    pub fn get(&self, id: ItemId) -> Option<&ItemInfo> {
        self.items.get(&id)
    }

    /// Get item metadata, failing with [`MapError::UnknownItemId`]
    pub fn info(&self, id: ItemId) -> Result<&ItemInfo, MapError> {
        self.items.get(&id).ok_or(MapError::UnknownItemId(id))
    }

    /// Category of an item
    pub fn category_of(&self, id: ItemId) -> Result<ItemCategory, MapError> {
        self.info(id).map(|item| item.category)
    }

    /// Whether an item snaps to the grid
    pub fn is_grid_snapped(&self, id: ItemId) -> Result<bool, MapError> {
        self.category_of(id).map(|c| c.is_grid_snapped())
    }

    /// Anchor kind of an item, if it is a fixed object
    pub fn anchor_of(&self, id: ItemId) -> Option<Anchor> {
        self.items.get(&id).and_then(|item| item.anchor)
    }

    /// First item carrying the given anchor
    pub fn find_anchor(&self, anchor: Anchor) -> Option<&ItemInfo> {
        self.items.values().find(|item| item.anchor == Some(anchor))
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All item ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    /// All items in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &ItemInfo> {
        self.items.values()
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_items(file.items)
    }

    /// Parse a catalog from TOML
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_items(file.items)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.to_file())?)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, CatalogError> {
        Ok(toml::to_string_pretty(&self.to_file())?)
    }

    /// Load a catalog file; `.toml` files are read as TOML, anything else as JSON
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_toml(&content)?
        } else {
            Self::from_json(&content)?
        };
        info!("Loaded {} catalog items from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Save a catalog file, choosing the format from the extension like [`Self::load`]
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let content = if path.extension().is_some_and(|ext| ext == "toml") {
            self.to_toml()?
        } else {
            self.to_json()?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    fn to_file(&self) -> CatalogFile {
        CatalogFile {
            items: self.items.values().cloned().collect(),
        }
    }
}
