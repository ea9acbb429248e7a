//! Editor settings and persistent configuration
//!
//! Settings are stored as TOML in the platform-specific config directory:
//! - Windows: %APPDATA%/mapmaker/
//! - Linux: ~/.config/mapmaker/
//! - macOS: ~/Library/Application Support/mapmaker/

use bevy::log::{info, warn};
use directories::ProjectDirs;
use mapmaker_autotile::TerrainVariants;
use mapmaker_core::{Vec2, TILE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Tunables for an editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Tile edge length in pixels
    pub tile_size: f32,
    /// Minimum time between two free-object placements
    pub placement_cooldown_ms: u64,
    /// Pixels moved per mouse wheel notch
    pub scroll_step: f32,
    pub window_width: f32,
    pub window_height: f32,
    /// Initial screen position of the player anchor
    pub player_start: [f32; 2],
    /// Initial screen position of the sky handle
    pub sky_start: [f32; 2],
    /// Terrain variant table the renderer has visuals for
    pub terrain_variants: TerrainVariants,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            placement_cooldown_ms: 400,
            scroll_step: 50.0,
            window_width: 1280.0,
            window_height: 720.0,
            player_start: [200.0, 360.0],
            sky_start: [640.0, 360.0],
            terrain_variants: TerrainVariants::any(),
        }
    }
}

impl EditorSettings {
    pub fn placement_cooldown(&self) -> Duration {
        Duration::from_millis(self.placement_cooldown_ms)
    }

    pub fn player_start(&self) -> Vec2 {
        Vec2::from_array(self.player_start)
    }

    pub fn sky_start(&self) -> Vec2 {
        Vec2::from_array(self.sky_start)
    }

    /// Check values a session cannot run with. The tile size must be a
    /// positive whole number of pixels so grid cells line up with export
    /// positions.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 || self.tile_size.fract() != 0.0 {
            return Err(SettingsError::Invalid(format!(
                "tile_size must be a positive whole number, got {}",
                self.tile_size
            )));
        }
        Ok(())
    }

    /// Get the config directory path for the editor
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "mapmaker", "mapmaker").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(SETTINGS_FILE))
    }

    /// Load settings from the config directory, returning defaults on any failure
    pub fn load() -> Self {
        let result = Self::settings_path()
            .ok_or(SettingsError::NoConfigDir)
            .and_then(|path| {
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            });

        match result {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Could not load settings: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content)?;
        settings.validate()?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to a file, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}
