use layout_ai_core::config::GameTypeProfile;
use layout_ai_core::types::{Catalog, CatalogEntry, Cell, GridSpec, LayoutData};
use layout_ai_core::{finalize_layout, recover_layout, repair_grid_layout, validate, RecoveryPath};

const TD_RESPONSE: &str = "```json\n{\"gameType\":\"td\",\"objects\":[{\"id\":\"Spawner\",\"position\":{\"x\":5,\"y\":0,\"z\":5}},{\"id\":\"Base\",\"position\":{\"x\":5,\"y\":0,\"z\":2}}]}\n```";

fn td_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogEntry::new("Spawner").with_tags(["spawner"]).with_max(1),
        CatalogEntry::new("Base").with_tags(["base"]).with_max(1),
        CatalogEntry::new("PathTile").with_tags(["path"]),
        CatalogEntry::new("TowerSlot").with_tags(["towerSlot"]).with_max(4),
    ])
}

fn cell(layout: &LayoutData, index: usize) -> Cell {
    let position = layout.objects[index].position;
    Cell::new(position.x as i32, position.z as i32)
}

fn on_boundary(grid: &GridSpec, cell: Cell) -> bool {
    cell.x == 0 || cell.z == 0 || cell.x == grid.max_x() || cell.z == grid.max_z()
}

#[test]
fn test_fenced_td_response_becomes_connected_level() {
    let grid = GridSpec::new(10, 10);
    let recovered = recover_layout(TD_RESPONSE).unwrap();
    assert_eq!(recovered.path, RecoveryPath::Strict);

    let mut layout = recovered.layout;
    let report = repair_grid_layout(&mut layout, &grid, &td_catalog());

    let spawner = cell(&layout, 0);
    let base = cell(&layout, 1);
    assert!(on_boundary(&grid, spawner));
    assert!(on_boundary(&grid, base));

    let mut chain = vec![spawner];
    chain.extend(
        layout
            .objects
            .iter()
            .filter(|o| o.id == "PathTile")
            .map(|o| Cell::new(o.position.x as i32, o.position.z as i32)),
    );
    chain.push(base);
    assert!(chain.len() > 2);
    assert_eq!(chain, report.route);
    for pair in chain.windows(2) {
        assert!(pair[0].is_adjacent(&pair[1]));
    }
}

#[test]
fn test_tolerant_recovery_of_broken_object() {
    let raw = r#"{"gameType":"td","objects":[{"id":"TowerSlot","position":{"x":3,"y":0,"z":4},},}]}}"#;
    let recovered = recover_layout(raw).unwrap();
    assert_eq!(recovered.path, RecoveryPath::Tolerant);
    assert_eq!(recovered.layout.objects.len(), 1);
    assert_eq!(recovered.layout.objects[0].id, "TowerSlot");
    assert_eq!(recovered.layout.objects[0].position.x, 3.0);
    assert_eq!(recovered.layout.objects[0].position.z, 4.0);
}

#[test]
fn test_finalized_layout_passes_validation() {
    let profile = GameTypeProfile::new("td", td_catalog()).with_grid(GridSpec::new(10, 10));
    let raw = r#"{"choices":[{"message":{"content":"{\"gameType\":\"td\",\"objects\":[{\"id\":\"Spawner\",\"position\":{\"x\":1,\"y\":0,\"z\":4}},{\"id\":\"Spawner\",\"position\":{\"x\":2,\"y\":0,\"z\":4}},{\"id\":\"Base\",\"position\":{\"x\":8,\"y\":0,\"z\":4}},{\"id\":\"TowerSlot\",\"position\":{\"x\":4,\"y\":0,\"z\":4}},{\"id\":\"TowerSlot\",\"position\":{\"x\":4,\"y\":0,\"z\":4}}]}"}}]}"#;

    let layout = recover_layout(raw).unwrap().layout;
    let outcome = finalize_layout(layout, &profile);
    let report = validate(&outcome.layout, &profile);
    assert!(report.ok, "{}", report.message);
    assert_eq!(outcome.layout.count_of("Spawner"), 1);
    assert_eq!(outcome.layout.count_of("TowerSlot"), 2);

    let again = finalize_layout(outcome.layout.clone(), &profile);
    assert_eq!(again.layout, outcome.layout);
}

#[test]
fn test_bundled_profiles_load() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../profiles");
    let td = GameTypeProfile::load(&root.join("td.toml")).unwrap();
    assert!(td.is_grid());
    assert_eq!(td.catalog.cap_for("spawner"), Some(1));

    let arena = GameTypeProfile::load(&root.join("arena-3d.toml")).unwrap();
    assert!(!arena.is_grid());

    let raw = layout_ai_core::FakeSource::default();
    let text = layout_ai_core::LayoutSource::complete(&raw, "", "").unwrap();
    let outcome = finalize_layout(recover_layout(&text).unwrap().layout, &arena);
    assert!(validate(&outcome.layout, &arena).ok);
}
