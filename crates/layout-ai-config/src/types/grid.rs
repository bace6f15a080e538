//! Grid geometry for tile-based game types

use super::layout::Vec3;
use serde::{Deserialize, Serialize};

/// A cell on the ground plane. `z` is the row, `x` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn manhattan(&self, other: &Cell) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    /// True when the two cells share an edge
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// Position of the cell in grid units, at the given height
    pub fn to_position(self, y: f32) -> Vec3 {
        Vec3::new(self.x as f32, y, self.z as f32)
    }
}

/// Where the grid origin sits relative to the cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginMode {
    /// Origin is the bottom-left corner of cell (0, 0)
    #[default]
    BottomLeft,
    /// Origin is the center of the whole grid
    Center,
}

/// Dimensions and world placement of a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub width: u32,
    pub height: u32,
    pub cell_size: f32,
    pub origin_mode: OriginMode,
    pub origin: Vec3,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            width: 12,
            height: 8,
            cell_size: 2.0,
            origin_mode: OriginMode::BottomLeft,
            origin: Vec3::ZERO,
        }
    }
}

impl GridSpec {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_origin(mut self, origin: Vec3, mode: OriginMode) -> Self {
        self.origin = origin;
        self.origin_mode = mode;
        self
    }

    /// Largest valid column index
    pub fn max_x(&self) -> i32 {
        self.width.max(1) as i32 - 1
    }

    /// Largest valid row index
    pub fn max_z(&self) -> i32 {
        self.height.max(1) as i32 - 1
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..=self.max_x()).contains(&cell.x) && (0..=self.max_z()).contains(&cell.z)
    }

    pub fn clamp_cell(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.clamp(0, self.max_x()), cell.z.clamp(0, self.max_z()))
    }

    /// Cell for a position expressed in grid units (x/z rounded, then clamped)
    pub fn cell_of(&self, position: &Vec3) -> Cell {
        self.clamp_cell(Cell::new(
            position.x.round() as i32,
            position.z.round() as i32,
        ))
    }

    /// In-grid orthogonal neighbors, in the fixed order +x, -x, +z, -z
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .map(move |(dx, dz)| Cell::new(cell.x + dx, cell.z + dz))
            .filter(move |c| self.contains(*c))
    }

    /// World-space center of a cell
    pub fn cell_to_world(&self, cell: Cell, y: f32) -> Vec3 {
        let (off_x, off_z) = self.origin_offset();
        Vec3::new(
            self.origin.x + (cell.x as f32 + 0.5 - off_x) * self.cell_size,
            self.origin.y + y,
            self.origin.z + (cell.z as f32 + 0.5 - off_z) * self.cell_size,
        )
    }

    /// Cell containing a world-space position, clamped into the grid
    pub fn world_to_cell(&self, position: &Vec3) -> Cell {
        let (off_x, off_z) = self.origin_offset();
        let size = if self.cell_size > 0.0 { self.cell_size } else { 1.0 };
        let x = ((position.x - self.origin.x) / size + off_x).floor() as i32;
        let z = ((position.z - self.origin.z) / size + off_z).floor() as i32;
        self.clamp_cell(Cell::new(x, z))
    }

    fn origin_offset(&self) -> (f32, f32) {
        match self.origin_mode {
            OriginMode::BottomLeft => (0.0, 0.0),
            OriginMode::Center => (self.width as f32 / 2.0, self.height as f32 / 2.0),
        }
    }
}
