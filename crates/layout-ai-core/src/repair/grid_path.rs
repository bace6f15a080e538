//! Grid path repair
//!
//! Rewrites an arbitrary set of grid objects into a path-based layout:
//! spawner and goal on the grid edge, a connected route of path tiles
//! between them, tower slots next to the route, and capped decorations.
//!
//! Every search has a fallback, so repair always terminates with a layout,
//! possibly a degraded one.

use super::prune::prune_by_capacity;
use super::role::{classify_role, Role};
use layout_ai_config::types::{Catalog, Cell, GridSpec, LayoutData, LayoutObject};
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

/// Cap applied to decoration ids whose catalog entry has none
pub const DEFAULT_DECORATION_CAP: usize = 3;

/// Score penalty for a slot that is not next to the path
const NOT_ADJACENT_PENALTY: i64 = 1000;

/// Distance reported when the layout has no path at all
const NO_PATH_DISTANCE: i64 = 1_000_000;

/// What a repair pass did to a layout
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepairReport {
    /// Full route from spawner to goal, both included. Empty when the layout
    /// lacks a spawner or a goal.
    pub route: Vec<Cell>,
    /// The shortest route was straight and got replaced by a curved one
    pub curved: bool,
    /// No route was found and the two-point fallback was used
    pub fallback_route: bool,
    /// Objects moved off an occupied or unsuitable cell
    pub relocated: usize,
    /// Duplicate (id, cell) entries removed
    pub duplicates_removed: usize,
    /// Objects removed by capacity limits
    pub pruned: usize,
    /// Objects without any free cell, and decorations on occupied cells
    pub dropped: usize,
}

impl RepairReport {
    /// Route cells excluding the spawner and goal
    pub fn interior(&self) -> &[Cell] {
        if self.route.len() <= 2 {
            &[]
        } else {
            &self.route[1..self.route.len() - 1]
        }
    }
}

/// An object together with its role and snapped cell
#[derive(Debug, Clone)]
struct Placed {
    object: LayoutObject,
    role: Role,
    cell: Cell,
}

/// Repair a grid layout in place. See the module docs for the steps.
pub fn repair_grid_layout(
    layout: &mut LayoutData,
    grid: &GridSpec,
    catalog: &Catalog,
) -> RepairReport {
    let mut report = RepairReport::default();
    let incoming = std::mem::take(&mut layout.objects);

    let placed: Vec<Placed> = incoming
        .into_iter()
        .map(|object| Placed {
            role: classify_role(&object.id, catalog),
            cell: grid.cell_of(&object.position),
            object,
        })
        .collect();

    let path_id = placed
        .iter()
        .find(|p| p.role == Role::Path)
        .map(|p| p.object.id.clone())
        .or_else(|| {
            catalog
                .iter()
                .find(|entry| classify_role(&entry.id, catalog) == Role::Path)
                .map(|entry| entry.id.clone())
        });

    // Existing path tiles are rebuilt from the route below. Surplus
    // spawners and goals go first so the endpoints cannot be pruned later.
    let placed: Vec<Placed> = placed.into_iter().filter(|p| p.role != Role::Path).collect();
    let before = placed.len();
    let mut placed = prune_by_capacity(
        placed,
        |p| p.object.id.to_ascii_lowercase(),
        |id| match classify_role(id, catalog) {
            Role::Spawner | Role::Base => catalog.cap_for(id),
            _ => None,
        },
        |index, _| index,
    );
    report.pruned += before - placed.len();

    for p in placed
        .iter_mut()
        .filter(|p| matches!(p.role, Role::Spawner | Role::Base))
    {
        p.cell = edge_clamp(grid, p.cell);
    }

    let start_index = placed.iter().position(|p| p.role == Role::Spawner);
    let goal_index = placed.iter().position(|p| p.role == Role::Base);
    let start = start_index.map(|i| placed[i].cell);
    let goal = goal_index.map(|i| placed[i].cell);
    report.route = match (start, goal) {
        (Some(start), Some(goal)) => plan_route(grid, start, goal, &mut report),
        _ => {
            tracing::warn!("Layout has no spawner/goal pair, skipping path construction");
            Vec::new()
        }
    };

    let path_cells: Vec<Cell> = if report.interior().is_empty() {
        report.route.clone()
    } else {
        report.interior().to_vec()
    };
    let path_set: HashSet<Cell> = path_cells.iter().copied().collect();
    let touches_path = |cell: Cell| grid.neighbors(cell).any(|n| path_set.contains(&n));
    let on_edge = |cell: Cell| {
        cell.x == 0 || cell.z == 0 || cell.x == grid.max_x() || cell.z == grid.max_z()
    };

    let mut occupied: HashSet<Cell> = report.route.iter().copied().collect();
    occupied.extend(start.into_iter().chain(goal));
    // (lowercased id, cell) already placed; a repeat stays put for dedup
    let mut claimed: HashSet<(String, Cell)> = HashSet::new();

    let mut kept = Vec::with_capacity(placed.len());
    for (index, mut p) in placed.into_iter().enumerate() {
        let key = p.object.id.to_ascii_lowercase();
        match p.role {
            Role::Spawner | Role::Base
                if Some(index) == start_index || Some(index) == goal_index => {}
            Role::Slot => {
                let fits = |cell: Cell| {
                    !occupied.contains(&cell) && (path_set.is_empty() || touches_path(cell))
                };
                let target = nearest_cell(grid, p.cell, &fits)
                    .or_else(|| nearest_cell(grid, p.cell, |c| !occupied.contains(&c)));
                let Some(target) = target else {
                    tracing::warn!("No free cell left for slot '{}', dropping it", p.object.id);
                    report.dropped += 1;
                    continue;
                };
                if target != p.cell {
                    report.relocated += 1;
                    p.cell = target;
                }
                occupied.insert(target);
            }
            Role::Decoration => {
                if !occupied.insert(p.cell) {
                    report.dropped += 1;
                    continue;
                }
            }
            role => {
                if claimed.contains(&(key.clone(), p.cell)) {
                    kept.push(p);
                    continue;
                }
                // extra spawners and goals stay on the edge
                let endpoint = matches!(role, Role::Spawner | Role::Base);
                let target = nearest_cell(grid, p.cell, |c| {
                    !occupied.contains(&c) && (!endpoint || on_edge(c))
                });
                let Some(target) = target else {
                    tracing::warn!("No free cell left for '{}', dropping it", p.object.id);
                    report.dropped += 1;
                    continue;
                };
                if target != p.cell {
                    report.relocated += 1;
                    p.cell = target;
                }
                occupied.insert(target);
            }
        }
        claimed.insert((key, p.cell));
        kept.push(p);
    }

    let before = kept.len();
    let mut seen = HashSet::new();
    let deduped: Vec<Placed> = kept
        .into_iter()
        .filter(|p| seen.insert((p.object.id.to_ascii_lowercase(), p.cell)))
        .collect();
    report.duplicates_removed = before - deduped.len();

    let distance = |cell: Cell| {
        path_cells
            .iter()
            .map(|p| p.manhattan(&cell) as i64)
            .min()
            .unwrap_or(NO_PATH_DISTANCE)
    };

    let before = deduped.len();
    let slots_capped = prune_by_capacity(
        deduped,
        |p| p.object.id.to_ascii_lowercase(),
        |id| match classify_role(id, catalog) {
            Role::Slot => catalog.cap_for(id),
            _ => None,
        },
        |_, p| {
            let penalty = if touches_path(p.cell) { 0 } else { NOT_ADJACENT_PENALTY };
            penalty + distance(p.cell)
        },
    );
    let decorations_capped = prune_by_capacity(
        slots_capped,
        |p| p.object.id.to_ascii_lowercase(),
        |id| match classify_role(id, catalog) {
            Role::Decoration => Some(catalog.cap_for(id).unwrap_or(DEFAULT_DECORATION_CAP)),
            _ => None,
        },
        |_, p| -distance(p.cell),
    );
    report.pruned += before - decorations_capped.len();

    let mut objects: Vec<LayoutObject> = decorations_capped
        .into_iter()
        .map(|p| {
            let mut object = p.object;
            object.position = p.cell.to_position(object.position.y);
            object
        })
        .collect();

    match &path_id {
        Some(id) => objects.extend(
            report
                .interior()
                .iter()
                .map(|cell| LayoutObject::new(id.clone(), cell.to_position(0.0))),
        ),
        None if !report.interior().is_empty() => {
            tracing::warn!("No path id in layout or catalog, route is not materialized");
        }
        None => {}
    }

    layout.objects = objects;
    tracing::debug!(
        "Grid repair: route {} cells (curved: {}), {} relocated, {} pruned, {} dropped",
        report.route.len(),
        report.curved,
        report.relocated,
        report.pruned,
        report.dropped
    );
    report
}

/// Snap a cell onto the nearest grid edge. Ties prefer left, right, bottom,
/// top, in that order.
pub fn edge_clamp(grid: &GridSpec, cell: Cell) -> Cell {
    let cell = grid.clamp_cell(cell);
    let candidates = [
        (cell.x, Cell::new(0, cell.z)),
        (grid.max_x() - cell.x, Cell::new(grid.max_x(), cell.z)),
        (cell.z, Cell::new(cell.x, 0)),
        (grid.max_z() - cell.z, Cell::new(cell.x, grid.max_z())),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.0 < best.0 {
            best = *candidate;
        }
    }
    best.1
}

/// Breadth-first shortest path on the open 4-connected grid, both endpoints
/// included. Neighbors expand in the order +x, -x, +z, -z.
pub fn shortest_path(grid: &GridSpec, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if !grid.contains(start) || !grid.contains(goal) {
        return None;
    }

    let mut previous: HashMap<Cell, Cell> = HashMap::new();
    let mut visited: HashSet<Cell> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            let mut path = vec![goal];
            let mut current = goal;
            while let Some(&prev) = previous.get(&current) {
                path.push(prev);
                current = prev;
            }
            path.reverse();
            return Some(path);
        }

        for next in grid.neighbors(cell) {
            if visited.insert(next) {
                previous.insert(next, cell);
                queue.push_back(next);
            }
        }
    }

    None
}

/// True when a route of two or more cells runs along a single row or column
pub fn is_straight(route: &[Cell]) -> bool {
    let Some(first) = route.first() else {
        return false;
    };
    route.len() >= 2
        && (route.iter().all(|c| c.x == first.x) || route.iter().all(|c| c.z == first.z))
}

/// Two-turn route through waypoints at one and two thirds of the width.
///
/// Waypoint columns are visited in the direction of travel; rows go from a
/// third to two thirds of the height when the spawner-to-goal direction
/// (x, or z for vertical routes) is non-negative, the other way otherwise.
pub fn curved_route(grid: &GridSpec, start: Cell, goal: Cell) -> Vec<Cell> {
    let width = grid.width as i32;
    let height = grid.height as i32;
    let dx = goal.x - start.x;
    let dz = goal.z - start.z;
    let sign = if dx != 0 { dx.signum() } else { dz.signum() };

    let (x_a, x_b) = if dx >= 0 {
        (width / 3, 2 * width / 3)
    } else {
        (2 * width / 3, width / 3)
    };
    let (z_a, z_b) = if sign >= 0 {
        (height / 3, 2 * height / 3)
    } else {
        (2 * height / 3, height / 3)
    };

    let waypoints = [
        start,
        grid.clamp_cell(Cell::new(x_a, z_a)),
        grid.clamp_cell(Cell::new(x_b, z_b)),
        goal,
    ];
    stitch(grid, &waypoints)
}

/// Join consecutive waypoints with shortest paths into one simple route.
/// Junction cells appear once, and any loop a later segment closes is
/// erased.
fn stitch(grid: &GridSpec, waypoints: &[Cell]) -> Vec<Cell> {
    let mut route: Vec<Cell> = Vec::new();
    let mut position: HashMap<Cell, usize> = HashMap::new();

    for pair in waypoints.windows(2) {
        let segment =
            shortest_path(grid, pair[0], pair[1]).unwrap_or_else(|| vec![pair[0], pair[1]]);
        for cell in segment {
            if let Some(&index) = position.get(&cell) {
                for removed in route.drain(index + 1..) {
                    position.remove(&removed);
                }
            } else {
                position.insert(cell, route.len());
                route.push(cell);
            }
        }
    }

    route
}

fn plan_route(grid: &GridSpec, start: Cell, goal: Cell, report: &mut RepairReport) -> Vec<Cell> {
    let route = match shortest_path(grid, start, goal) {
        Some(route) => route,
        None => {
            tracing::warn!(
                "No route from ({}, {}) to ({}, {}), using two-point fallback",
                start.x,
                start.z,
                goal.x,
                goal.z
            );
            report.fallback_route = true;
            return if start == goal { vec![start] } else { vec![start, goal] };
        }
    };

    if is_straight(&route) {
        report.curved = true;
        return curved_route(grid, start, goal);
    }
    route
}

/// Breadth-first search outward from `origin` for the first cell accepted
/// by `accept`. The origin itself is checked first.
fn nearest_cell(grid: &GridSpec, origin: Cell, accept: impl Fn(Cell) -> bool) -> Option<Cell> {
    let mut visited: HashSet<Cell> = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);

    while let Some(cell) = queue.pop_front() {
        if accept(cell) {
            return Some(cell);
        }
        for next in grid.neighbors(cell) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    None
}
