//! Layout documents as produced by the model

use serde::{Deserialize, Serialize};

/// Schema version written when a document does not declare one
pub const DEFAULT_SCHEMA_VERSION: &str = "1.0.0";

/// A point or vector in 3D space. Y is up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new vector
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Manhattan distance on the ground plane (x/z), ignoring height
    pub fn planar_manhattan(&self, other: &Vec3) -> f32 {
        (self.x - other.x).abs() + (self.z - other.z).abs()
    }
}

/// One placed object in a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutObject {
    /// Catalog key
    pub id: String,
    /// Grid cell or world position, depending on the profile's coordinate space
    pub position: Vec3,
    /// Euler angles in degrees
    #[serde(
        default,
        alias = "rotationEuler",
        skip_serializing_if = "Option::is_none"
    )]
    pub rotation: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
}

impl LayoutObject {
    pub fn new(id: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            rotation: None,
            scale: None,
        }
    }
}

/// A complete generated level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutData {
    #[serde(rename = "schemaVersion", default = "default_schema_version")]
    pub schema_version: String,
    #[serde(rename = "gameType", default)]
    pub game_type: String,
    #[serde(default)]
    pub theme: String,
    pub objects: Vec<LayoutObject>,
}

fn default_schema_version() -> String {
    DEFAULT_SCHEMA_VERSION.to_string()
}

impl Default for LayoutData {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            game_type: String::new(),
            theme: String::new(),
            objects: Vec::new(),
        }
    }
}

impl LayoutData {
    /// Create an empty layout for a game type
    pub fn new(game_type: impl Into<String>) -> Self {
        Self {
            game_type: game_type.into(),
            ..Self::default()
        }
    }

    pub fn with_objects(mut self, objects: Vec<LayoutObject>) -> Self {
        self.objects = objects;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects whose id matches `id` (ASCII case-insensitive)
    pub fn count_of(&self, id: &str) -> usize {
        self.objects
            .iter()
            .filter(|o| o.id.eq_ignore_ascii_case(id))
            .count()
    }
}
