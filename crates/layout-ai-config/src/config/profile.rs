//! Game type profiles
//!
//! A profile binds a game type id to its object catalog and to the geometry
//! layouts are placed in: a tile grid, or a free-form world arena.

use super::ConfigError;
use crate::types::{Catalog, GridSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// How object positions of a game type are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// Positions are world units
    #[default]
    World,
    /// Positions are grid cells (x = column, z = row)
    Grid,
}

impl CoordinateSpace {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateSpace::World => "World",
            CoordinateSpace::Grid => "Grid",
        }
    }
}

/// Arena fitting rules for world-space layouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub world_scale: f32,
    /// Arena extent along x and z, centered on the origin
    pub arena_size: [f32; 2],
    pub auto_fit: bool,
    pub fit_margin: f32,
    pub clamp_to_arena: bool,
    pub clamp_padding: f32,
    pub snap_to_step: bool,
    pub step: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            world_scale: 1.0,
            arena_size: [40.0, 40.0],
            auto_fit: true,
            fit_margin: 0.9,
            clamp_to_arena: true,
            clamp_padding: 0.5,
            snap_to_step: true,
            step: 2.0,
        }
    }
}

impl WorldSettings {
    /// Fit margin restricted to `0.1..=1.0`
    pub fn effective_fit_margin(&self) -> f32 {
        self.fit_margin.clamp(0.1, 1.0)
    }
}

/// Everything the pipeline needs to know about one game type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTypeProfile {
    pub game_type: String,
    #[serde(default)]
    pub coordinate_space: CoordinateSpace,
    #[serde(default)]
    pub allowed_themes: Vec<String>,
    #[serde(default)]
    pub world_description: String,
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub world: WorldSettings,
}

impl GameTypeProfile {
    pub fn new(game_type: impl Into<String>, catalog: Catalog) -> Self {
        Self {
            game_type: game_type.into(),
            coordinate_space: CoordinateSpace::World,
            allowed_themes: Vec::new(),
            world_description: String::new(),
            catalog,
            grid: GridSpec::default(),
            world: WorldSettings::default(),
        }
    }

    /// Switch the profile to grid coordinates with the given grid
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.coordinate_space = CoordinateSpace::Grid;
        self.grid = grid;
        self
    }

    pub fn with_themes<I, S>(mut self, themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_themes = themes.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_grid(&self) -> bool {
        self.coordinate_space == CoordinateSpace::Grid
    }

    /// Parse and validate a profile from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let profile: GameTypeProfile = toml::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load and validate a profile file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded profile '{}' from {} ({} catalog entries)",
            profile.game_type,
            path.display(),
            profile.catalog.len()
        );
        Ok(profile)
    }

    /// Check the structural constraints a usable profile must satisfy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game_type.trim().is_empty() {
            return Err(ConfigError::Invalid("game_type must not be empty".into()));
        }

        if self.is_grid() {
            if self.grid.width == 0 || self.grid.height == 0 {
                return Err(ConfigError::Invalid(format!(
                    "grid dimensions must be positive, got {}x{}",
                    self.grid.width, self.grid.height
                )));
            }
            if !(self.grid.cell_size > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "grid cell_size must be positive, got {}",
                    self.grid.cell_size
                )));
            }
        }

        let mut seen = HashSet::new();
        for entry in self.catalog.iter() {
            let key = entry.id.trim().to_ascii_lowercase();
            if key.is_empty() {
                return Err(ConfigError::Invalid("catalog entry with empty id".into()));
            }
            if !seen.insert(key) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate catalog id '{}'",
                    entry.id
                )));
            }
        }

        Ok(())
    }
}
