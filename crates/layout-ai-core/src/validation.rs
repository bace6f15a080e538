//! Layout validation against a game type profile

use layout_ai_config::config::GameTypeProfile;
use layout_ai_config::types::LayoutData;
use serde::Serialize;
use std::collections::HashMap;

/// Pass/fail verdict with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub message: String,
}

impl ValidationReport {
    pub fn pass() -> Self {
        Self {
            ok: true,
            message: "OK".to_string(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Check a layout against its profile. The first failure wins.
///
/// Checks, in order: the game type matches (ignoring ASCII case), then per
/// object that the id is non-empty, known to the catalog, and not placed more
/// often than its `maxPerLevel`.
pub fn validate(layout: &LayoutData, profile: &GameTypeProfile) -> ValidationReport {
    if !layout.game_type.eq_ignore_ascii_case(&profile.game_type) {
        return ValidationReport::fail(format!(
            "gameType mismatch: {} vs profile {}",
            layout.game_type, profile.game_type
        ));
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for object in &layout.objects {
        if object.id.trim().is_empty() {
            return ValidationReport::fail("Found object with empty id");
        }

        let Some(entry) = profile.catalog.get(&object.id) else {
            return ValidationReport::fail(format!("Object id '{}' not in catalog", object.id));
        };

        let count = counts.entry(entry.id.to_ascii_lowercase()).or_default();
        *count += 1;
        if let Some(cap) = entry.cap().filter(|cap| *count > *cap) {
            return ValidationReport::fail(format!(
                "Object '{}' exceeds maxPerLevel {}",
                object.id, cap
            ));
        }
    }

    ValidationReport::pass()
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_ai_config::types::{Catalog, CatalogEntry, LayoutObject, Vec3};

    fn profile() -> GameTypeProfile {
        GameTypeProfile::new(
            "arena-3d",
            Catalog::new(vec![
                CatalogEntry::new("EnemySpawner.Basic").with_max(2),
                CatalogEntry::new("Cover.CrateSmall"),
            ]),
        )
    }

    fn layout(ids: &[&str]) -> LayoutData {
        LayoutData::new("Arena-3D").with_objects(
            ids.iter()
                .map(|id| LayoutObject::new(*id, Vec3::ZERO))
                .collect(),
        )
    }

    #[test]
    fn test_valid_layout() {
        let report = validate(&layout(&["EnemySpawner.Basic", "Cover.CrateSmall"]), &profile());
        assert_eq!(report, ValidationReport::pass());
        assert_eq!(report.message, "OK");
    }

    #[test]
    fn test_game_type_mismatch() {
        let mut data = layout(&["Cover.CrateSmall"]);
        data.game_type = "td".to_string();
        let report = validate(&data, &profile());
        assert!(!report.ok);
        assert_eq!(report.message, "gameType mismatch: td vs profile arena-3d");
    }

    #[test]
    fn test_empty_id() {
        let report = validate(&layout(&["Cover.CrateSmall", "  "]), &profile());
        assert_eq!(report.message, "Found object with empty id");
    }

    #[test]
    fn test_unknown_id() {
        let report = validate(&layout(&["Tree.Big"]), &profile());
        assert_eq!(report.message, "Object id 'Tree.Big' not in catalog");
    }

    #[test]
    fn test_cap_counts_ids_case_insensitively() {
        let data = layout(&["EnemySpawner.Basic", "enemyspawner.basic", "EnemySpawner.Basic"]);
        let report = validate(&data, &profile());
        assert_eq!(
            report.message,
            "Object 'EnemySpawner.Basic' exceeds maxPerLevel 2"
        );
    }

    #[test]
    fn test_uncapped_ids_never_exceed() {
        let data = layout(&["Cover.CrateSmall"; 50]);
        assert!(validate(&data, &profile()).ok);
    }
}
