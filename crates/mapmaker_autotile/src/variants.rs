//! Terrain variant table keyed by neighbor pattern string

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Variant used when a pattern has no registered visual
pub const FALLBACK_VARIANT: &str = "X";

fn default_fallback() -> String {
    FALLBACK_VARIANT.to_string()
}

/// The set of terrain patterns the renderer has visuals for.
///
/// Looking up an unregistered pattern yields the fallback variant. A table
/// created with [`TerrainVariants::any`] accepts every pattern as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainVariants {
    /// Registered pattern strings; `None` accepts every pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    registered: Option<BTreeSet<String>>,
    #[serde(default = "default_fallback")]
    fallback: String,
}

impl Default for TerrainVariants {
    fn default() -> Self {
        Self::any()
    }
}

impl TerrainVariants {
    /// Accept every pattern
    pub fn any() -> Self {
        Self {
            registered: None,
            fallback: default_fallback(),
        }
    }

    /// Only accept the given patterns
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            registered: Some(patterns.into_iter().map(Into::into).collect()),
            fallback: default_fallback(),
        }
    }

    /// Use a different fallback variant
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Register one more pattern. Turns an accept-all table into a restricted one.
    pub fn register(&mut self, pattern: impl Into<String>) {
        self.registered
            .get_or_insert_with(BTreeSet::new)
            .insert(pattern.into());
    }

    /// Whether a pattern has a visual of its own
    pub fn contains(&self, pattern: &str) -> bool {
        self.registered
            .as_ref()
            .map_or(true, |set| set.contains(pattern))
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Variant identifier for a pattern string
    pub fn resolve<'a>(&'a self, pattern: &'a str) -> &'a str {
        if self.contains(pattern) {
            pattern
        } else {
            &self.fallback
        }
    }
}
