//! Prompt construction for layout generation
//!
//! The model sees two messages: a system message with the output contract
//! and the JSON schema, and a user message with the profile capabilities and
//! the designer's request.

use layout_ai_config::config::GameTypeProfile;
use serde::Serialize;

/// JSON schema sent when no schema file is configured
pub const LAYOUT_SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "LayoutData",
  "type": "object",
  "required": ["gameType", "objects"],
  "properties": {
    "schemaVersion": { "type": "string" },
    "gameType": { "type": "string" },
    "theme": { "type": "string" },
    "objects": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["id", "position"],
        "properties": {
          "id": { "type": "string" },
          "position": { "$ref": "#/definitions/vec3" },
          "rotationEuler": { "$ref": "#/definitions/vec3" },
          "scale": { "$ref": "#/definitions/vec3" }
        }
      }
    }
  },
  "definitions": {
    "vec3": {
      "type": "object",
      "required": ["x", "y", "z"],
      "properties": {
        "x": { "type": "number" },
        "y": { "type": "number" },
        "z": { "type": "number" }
      }
    }
  }
}"##;

/// One catalog entry as described to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    /// 0 when unbounded
    pub max_per_level: u32,
    pub tags: Vec<String>,
}

/// What the model may place for a game type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub game_type: String,
    pub allowed_themes: Vec<String>,
    pub objects: Vec<CatalogItem>,
    pub world_description: String,
    pub coordinate_space: String,
    pub world_scale: f32,
    pub cell_size: f32,
    pub grid_width: u32,
    pub grid_height: u32,
}

impl Capabilities {
    pub fn from_profile(profile: &GameTypeProfile) -> Self {
        let objects = profile
            .catalog
            .iter()
            .filter(|entry| !entry.id.trim().is_empty())
            .map(|entry| CatalogItem {
                id: entry.id.clone(),
                max_per_level: entry.max_per_level.unwrap_or(0),
                tags: entry.tags.clone(),
            })
            .collect();

        Self {
            game_type: profile.game_type.clone(),
            allowed_themes: profile.allowed_themes.clone(),
            objects,
            world_description: profile.world_description.clone(),
            coordinate_space: profile.coordinate_space.as_str().to_string(),
            world_scale: profile.world.world_scale,
            cell_size: profile.grid.cell_size,
            grid_width: profile.grid.width,
            grid_height: profile.grid.height,
        }
    }

    /// Pretty-printed JSON, as embedded in the user message
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// System message carrying the output contract and the schema
pub fn build_system_message(schema: &str) -> String {
    let schema = if schema.trim().is_empty() { "{}" } else { schema };

    let mut message = String::new();
    message.push_str("You generate level layouts for a game level editor.\n");
    message.push_str("Output requirements:\n");
    message.push_str("- Return ONLY a single JSON object. No prose, no markdown, no code fences.\n");
    message.push_str("- The JSON MUST validate against the JSON Schema provided below.\n");
    message.push_str("- Use ONLY object IDs present in the provided catalog.\n");
    message.push_str("- Do NOT invent new fields or properties.\n");
    message.push_str("- Units: meters. Axis: Y is up.\n");
    message.push('\n');
    message.push_str("JSON Schema:\n");
    message.push_str(schema);
    message.push('\n');
    message
}

/// User message carrying the capabilities and the request
pub fn build_user_message(request: &str, capabilities_json: &str) -> String {
    let capabilities_json = if capabilities_json.trim().is_empty() {
        "{}"
    } else {
        capabilities_json
    };

    let mut message = String::new();
    message.push_str("Catalog and constraints (capabilities):\n");
    message.push_str(capabilities_json);
    message.push_str("\n\n");
    message.push_str("User request:\n");
    message.push_str(request);
    message.push_str("\n\n");
    message.push_str("Important:\n");
    message.push_str("- gameType must equal capabilities.gameType.\n");
    message.push_str(
        "- theme must be one of capabilities.allowedThemes; if none fits, use \"default\".\n",
    );
    message.push_str("- Every object must include:\n");
    message.push_str("  • id  (must exist in catalog)\n");
    message.push_str("  • position { x, y, z }\n");
    message.push_str("- Respect maxPerLevel for each id.\n");
    message.push('\n');
    message.push_str("Return only the JSON object; do not wrap it in any extra characters.\n");
    message
}
