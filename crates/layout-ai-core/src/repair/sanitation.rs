//! Catalog cap enforcement
//!
//! A standalone pass that trims every id group down to its catalog
//! `maxPerLevel`, for layouts that never went through grid repair or that
//! were edited afterwards.

use super::prune::prune_by_capacity;
use super::role::{classify_role, Role};
use layout_ai_config::config::GameTypeProfile;
use layout_ai_config::types::{LayoutData, Vec3};

/// Remove objects beyond their catalog cap and return how many were removed.
///
/// Slot and decoration groups prefer objects close to the path when the
/// layout has path objects. Other groups prefer row-major order (`z`, then
/// `x`) on grid profiles and keep input order on world profiles.
pub fn enforce_catalog_caps(layout: &mut LayoutData, profile: &GameTypeProfile) -> usize {
    let catalog = &profile.catalog;
    let path_positions: Vec<Vec3> = layout
        .objects
        .iter()
        .filter(|o| classify_role(&o.id, catalog) == Role::Path)
        .map(|o| o.position)
        .collect();

    let before = layout.objects.len();
    let objects = std::mem::take(&mut layout.objects);
    layout.objects = prune_by_capacity(
        objects,
        |o| o.id.to_ascii_lowercase(),
        |id| catalog.cap_for(id),
        |index, o| {
            let near_path = matches!(
                classify_role(&o.id, catalog),
                Role::Slot | Role::Decoration
            );
            if near_path && !path_positions.is_empty() {
                let distance = path_positions
                    .iter()
                    .map(|p| p.planar_manhattan(&o.position))
                    .fold(f32::INFINITY, f32::min);
                (distance, 0.0, 0.0)
            } else if profile.is_grid() {
                (o.position.z, o.position.x, 0.0)
            } else {
                (index as f32, 0.0, 0.0)
            }
        },
    );

    let path_kept = count_path_objects(layout, profile);
    if path_kept < path_positions.len() {
        tracing::warn!(
            "Path cap for '{}' removed {} of {} path objects, the route is no longer connected",
            profile.game_type,
            path_positions.len() - path_kept,
            path_positions.len()
        );
    }

    let removed = before - layout.objects.len();
    if removed > 0 {
        tracing::debug!(
            "Removed {} objects over their catalog caps for '{}'",
            removed,
            profile.game_type
        );
    }
    removed
}

fn count_path_objects(layout: &LayoutData, profile: &GameTypeProfile) -> usize {
    layout
        .objects
        .iter()
        .filter(|o| classify_role(&o.id, &profile.catalog) == Role::Path)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_ai_config::types::{Catalog, CatalogEntry, GridSpec, LayoutObject};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("PathTile").with_tags(["path"]),
            CatalogEntry::new("TowerSlot").with_tags(["towerSlot"]).with_max(1),
            CatalogEntry::new("Crate").with_max(2),
            CatalogEntry::new("Pickup"),
        ])
    }

    fn object(id: &str, x: f32, z: f32) -> LayoutObject {
        LayoutObject::new(id, Vec3::new(x, 0.0, z))
    }

    #[test]
    fn test_slots_nearest_path_survive() {
        let profile = GameTypeProfile::new("td", catalog()).with_grid(GridSpec::new(10, 10));
        let mut layout = LayoutData::new("td").with_objects(vec![
            object("TowerSlot", 8.0, 8.0),
            object("PathTile", 2.0, 2.0),
            object("TowerSlot", 3.0, 2.0),
        ]);

        assert_eq!(enforce_catalog_caps(&mut layout, &profile), 1);
        assert_eq!(layout.objects.len(), 2);
        assert_eq!(layout.objects[1].position, Vec3::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn test_grid_profile_uses_row_major_order() {
        let profile = GameTypeProfile::new("td", catalog()).with_grid(GridSpec::new(10, 10));
        let mut layout = LayoutData::new("td").with_objects(vec![
            object("Crate", 1.0, 5.0),
            object("Crate", 4.0, 1.0),
            object("Crate", 2.0, 1.0),
        ]);

        assert_eq!(enforce_catalog_caps(&mut layout, &profile), 1);
        let kept: Vec<Vec3> = layout.objects.iter().map(|o| o.position).collect();
        assert_eq!(kept, vec![Vec3::new(4.0, 0.0, 1.0), Vec3::new(2.0, 0.0, 1.0)]);
    }

    #[test]
    fn test_world_profile_keeps_input_order() {
        let profile = GameTypeProfile::new("arena-3d", catalog());
        let mut layout = LayoutData::new("arena-3d").with_objects(vec![
            object("crate", 1.0, 5.0),
            object("Crate", 4.0, 1.0),
            object("Crate", 2.0, 1.0),
            object("Pickup", 0.0, 0.0),
            object("Pickup", 0.0, 0.0),
        ]);

        assert_eq!(enforce_catalog_caps(&mut layout, &profile), 1);
        assert_eq!(layout.objects.len(), 4);
        assert_eq!(layout.objects[0].id, "crate");
        assert_eq!(layout.objects[1].position, Vec3::new(4.0, 0.0, 1.0));
    }

    #[test]
    fn test_capped_path_tiles_are_trimmed_row_major() {
        let catalog = Catalog::new(vec![CatalogEntry::new("PathTile")
            .with_tags(["path"])
            .with_max(2)]);
        let profile = GameTypeProfile::new("td", catalog).with_grid(GridSpec::new(10, 10));
        let mut layout = LayoutData::new("td").with_objects(vec![
            object("PathTile", 1.0, 3.0),
            object("PathTile", 1.0, 2.0),
            object("PathTile", 2.0, 2.0),
            object("PathTile", 2.0, 1.0),
        ]);

        assert_eq!(enforce_catalog_caps(&mut layout, &profile), 2);
        assert_eq!(count_path_objects(&layout, &profile), 2);
        let kept: Vec<Vec3> = layout.objects.iter().map(|o| o.position).collect();
        assert_eq!(kept, vec![Vec3::new(1.0, 0.0, 2.0), Vec3::new(2.0, 0.0, 1.0)]);
    }

    #[test]
    fn test_within_caps_is_noop() {
        let profile = GameTypeProfile::new("td", catalog());
        let mut layout = LayoutData::new("td").with_objects(vec![object("Crate", 0.0, 0.0)]);
        let original = layout.clone();
        assert_eq!(enforce_catalog_caps(&mut layout, &profile), 0);
        assert_eq!(layout, original);
    }
}
