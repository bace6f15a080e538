//! Layout repair
//!
//! Post-processing that makes a recovered layout usable for its game type:
//! grid layouts get a connected spawner-to-goal path with slots next to it,
//! world layouts are fitted into the arena, and both are trimmed to the
//! catalog caps.

pub mod grid_path;
pub mod prune;
pub mod role;
pub mod sanitation;
pub mod world_fit;

pub use grid_path::{repair_grid_layout, RepairReport, DEFAULT_DECORATION_CAP};
pub use prune::prune_by_capacity;
pub use role::{classify_role, Role};
pub use sanitation::enforce_catalog_caps;
pub use world_fit::fit_to_arena;

use layout_ai_config::config::GameTypeProfile;
use layout_ai_config::types::LayoutData;
use serde::Serialize;

/// Result of [`finalize_layout`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalizeOutcome {
    pub layout: LayoutData,
    /// Present for grid profiles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair: Option<RepairReport>,
    /// Auto-fit factor applied to world profiles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_factor: Option<f32>,
    /// Objects removed by catalog caps after repair or fitting
    pub capped: usize,
}

/// Run the post-processing appropriate for the profile's coordinate space
pub fn finalize_layout(mut layout: LayoutData, profile: &GameTypeProfile) -> FinalizeOutcome {
    let (repair, fit_factor) = if profile.is_grid() {
        let report = repair_grid_layout(&mut layout, &profile.grid, &profile.catalog);
        (Some(report), None)
    } else {
        (None, Some(fit_to_arena(&mut layout, &profile.world)))
    };

    let capped = enforce_catalog_caps(&mut layout, profile);
    tracing::debug!(
        "Finalized '{}' layout with {} objects",
        profile.game_type,
        layout.objects.len()
    );

    FinalizeOutcome {
        layout,
        repair,
        fit_factor,
        capped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_ai_config::types::{Catalog, CatalogEntry, GridSpec, LayoutObject, Vec3};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("PathTile").with_tags(["path"]),
            CatalogEntry::new("Spawner").with_tags(["spawner"]).with_max(1),
            CatalogEntry::new("Base").with_tags(["core"]).with_max(1),
            CatalogEntry::new("Crate").with_max(1),
        ])
    }

    #[test]
    fn test_grid_profile_repairs_and_caps() {
        let profile = GameTypeProfile::new("td", catalog()).with_grid(GridSpec::new(10, 10));
        let layout = LayoutData::new("td").with_objects(vec![
            LayoutObject::new("Spawner", Vec3::new(5.0, 0.0, 5.0)),
            LayoutObject::new("Base", Vec3::new(5.0, 0.0, 2.0)),
            LayoutObject::new("Crate", Vec3::new(1.0, 0.0, 7.0)),
            LayoutObject::new("Crate", Vec3::new(2.0, 0.0, 3.0)),
        ]);

        let outcome = finalize_layout(layout, &profile);
        let report = outcome.repair.as_ref().unwrap();
        assert_eq!(outcome.fit_factor, None);
        assert_eq!(outcome.capped, 1);
        assert_eq!(outcome.layout.count_of("PathTile"), report.interior().len());
        assert_eq!(outcome.layout.count_of("Crate"), 1);
        let crate_object = outcome.layout.objects.iter().find(|o| o.id == "Crate").unwrap();
        assert_eq!(crate_object.position, Vec3::new(2.0, 0.0, 3.0));
    }

    #[test]
    fn test_world_profile_fits_and_caps() {
        let profile = GameTypeProfile::new("arena-3d", catalog());
        let layout = LayoutData::new("arena-3d").with_objects(vec![
            LayoutObject::new("Crate", Vec3::new(3.0, 0.0, 1.0)),
            LayoutObject::new("Crate", Vec3::new(-5.0, 0.0, 0.0)),
        ]);

        let outcome = finalize_layout(layout, &profile);
        assert!(outcome.repair.is_none());
        assert_eq!(outcome.fit_factor, Some(1.0));
        assert_eq!(outcome.capped, 1);
        assert_eq!(outcome.layout.objects[0].position, Vec3::new(4.0, 0.0, 2.0));
    }
}
