//! The layered export structure handed to the playback stage

use mapmaker_core::{ItemId, ObjectBucket, WaterVariant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized pixel position `(x, y)`
pub type PixelPos = (i32, i32);

/// Placements of one layer, keyed by normalized pixel position
pub type Placements<V> = BTreeMap<PixelPos, V>;

/// Six placement layers produced by one export.
///
/// Each layer maps a normalized pixel position to a variant identifier.
/// In JSON every layer is written as a list of `{x, y, variant}` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLayers {
    #[serde(default, with = "placement_list")]
    pub water: Placements<WaterVariant>,
    /// Terrain variant names (pattern strings or the fallback)
    #[serde(default, with = "placement_list")]
    pub terrain: Placements<String>,
    #[serde(default, with = "placement_list")]
    pub background_objects: Placements<ItemId>,
    #[serde(default, with = "placement_list")]
    pub foreground_objects: Placements<ItemId>,
    #[serde(default, with = "placement_list")]
    pub enemies: Placements<ItemId>,
    #[serde(default, with = "placement_list")]
    pub coins: Placements<ItemId>,
}

impl ExportLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-object layer for a bucket
    pub fn objects(&self, bucket: ObjectBucket) -> &Placements<ItemId> {
        match bucket {
            ObjectBucket::Foreground => &self.foreground_objects,
            ObjectBucket::Background => &self.background_objects,
        }
    }

    pub fn objects_mut(&mut self, bucket: ObjectBucket) -> &mut Placements<ItemId> {
        match bucket {
            ObjectBucket::Foreground => &mut self.foreground_objects,
            ObjectBucket::Background => &mut self.background_objects,
        }
    }

    /// Total number of placements across all layers
    pub fn len(&self) -> usize {
        self.water.len()
            + self.terrain.len()
            + self.background_objects.len()
            + self.foreground_objects.len()
            + self.enemies.len()
            + self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every placement position across all layers
    pub fn positions(&self) -> impl Iterator<Item = PixelPos> + '_ {
        self.water
            .keys()
            .chain(self.terrain.keys())
            .chain(self.background_objects.keys())
            .chain(self.foreground_objects.keys())
            .chain(self.enemies.keys())
            .chain(self.coins.keys())
            .copied()
    }

    /// Component-wise minimum over every placement
    pub fn min_position(&self) -> Option<PixelPos> {
        self.positions()
            .reduce(|(ax, ay), (bx, by)| (ax.min(bx), ay.min(by)))
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Serde adapter writing a placement map as a list of `{x, y, variant}`
mod placement_list {
    use super::Placements;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct PlacementRef<'a, V> {
        x: i32,
        y: i32,
        variant: &'a V,
    }

    #[derive(Deserialize)]
    struct Placement<V> {
        x: i32,
        y: i32,
        variant: V,
    }

    pub fn serialize<S, V>(map: &Placements<V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        serializer.collect_seq(
            map.iter()
                .map(|(&(x, y), variant)| PlacementRef { x, y, variant }),
        )
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<Placements<V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let entries: Vec<Placement<V>> = Vec::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|p| ((p.x, p.y), p.variant))
            .collect())
    }
}
