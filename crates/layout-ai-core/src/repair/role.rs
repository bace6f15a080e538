//! Role classification of layout objects

use layout_ai_config::types::Catalog;
use serde::Serialize;

/// What part an object plays in a path-based layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A tile of the route between spawner and goal
    Path,
    /// A placeable spot that belongs next to the path (tower slots)
    Slot,
    Spawner,
    /// The goal the route leads to
    Base,
    Decoration,
    Other,
}

/// Keyword groups in matching order. Tags are compared whole, ids by
/// substring.
const ROLE_KEYWORDS: [(Role, &[&str]); 5] = [
    (Role::Spawner, &["spawner", "spawn"]),
    (Role::Base, &["base", "core", "goal"]),
    (Role::Path, &["path", "tile", "road"]),
    (Role::Slot, &["towerslot", "slot", "tower"]),
    (Role::Decoration, &["decoration", "decor", "prop"]),
];

/// Classify an object id.
///
/// Catalog tags decide when the id is known and tagged; otherwise the
/// lowercased id is matched against role keywords.
pub fn classify_role(id: &str, catalog: &Catalog) -> Role {
    if let Some(entry) = catalog.get(id).filter(|e| !e.tags.is_empty()) {
        return ROLE_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| entry.has_tag(k)))
            .map(|(role, _)| *role)
            .unwrap_or(Role::Other);
    }

    let lowered = id.to_ascii_lowercase();
    ROLE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(role, _)| *role)
        .unwrap_or(Role::Other)
}
