#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the zombie pursuit simulation.
//!
//! This crate defines the value types that connect the authoritative world,
//! the pure movement policies and the adapters. The world owns obstacle and
//! agent state, computes [`DistanceField`] values from either population, and
//! hands read-only [`ObstacleView`] snapshots to the movement policies which
//! respond with brand-new position lists.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Offsets the coordinate by the provided signed deltas.
    ///
    /// Returns `None` when the result would leave the `rows x columns` grid.
    /// There is no wraparound.
    #[must_use]
    pub fn offset(self, row_delta: i32, column_delta: i32, rows: u32, columns: u32) -> Option<Self> {
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        (row < rows && column < columns).then_some(Self::new(row, column))
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((row, column): (u32, u32)) -> Self {
        Self::new(row, column)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Populations that can seed a distance field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Agents that flee from zombies.
    Human,
    /// Agents that chase humans.
    Zombie,
}

impl EntityKind {
    /// Lowercase name used by scenario files and the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Zombie => "zombie",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = SimulationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "zombie" => Ok(Self::Zombie),
            _ => Err(SimulationError::InvalidEntityKind(value.to_owned())),
        }
    }
}

/// Neighbor relations available on the grid.
///
/// Neighbors are always enumerated in a fixed order: up, down, left, right,
/// followed for [`Neighborhood::EightWay`] by up-left, up-right, down-left and
/// down-right. Movement policies resolve ties in favour of the last
/// qualifying neighbor, so this order is observable in trajectories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    /// Orthogonal neighbors only.
    FourWay,
    /// Orthogonal and diagonal neighbors.
    EightWay,
}

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

impl Neighborhood {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::FourWay => &NEIGHBOR_OFFSETS[..4],
            Self::EightWay => &NEIGHBOR_OFFSETS[..],
        }
    }

    /// Enumerates the neighbors of `cell` that lie inside a `rows x columns` grid.
    pub fn neighbors(
        self,
        cell: CellCoord,
        rows: u32,
        columns: u32,
    ) -> impl Iterator<Item = CellCoord> {
        self.offsets()
            .iter()
            .filter_map(move |&(row_delta, column_delta)| {
                cell.offset(row_delta, column_delta, rows, columns)
            })
    }
}

/// Dense grid of shortest hop counts from the nearest agent of one kind.
///
/// Distances are stored in row-major order. Cells that the search never
/// reached, including obstacles, hold the [`DistanceField::sentinel`] value
/// `rows * columns`, which exceeds every real distance on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    rows: u32,
    columns: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Creates a field where every cell holds the sentinel value.
    #[must_use]
    pub fn unreached(rows: u32, columns: u32) -> Self {
        let sentinel = rows.saturating_mul(columns);
        let cell_count = usize::try_from(u64::from(rows) * u64::from(columns)).unwrap_or(0);
        Self {
            rows,
            columns,
            distances: vec![sentinel; cell_count],
        }
    }

    /// Builds a field from row-major distances.
    ///
    /// Fails with [`SimulationError::FieldLength`] when `distances` does not
    /// hold exactly one entry per cell.
    pub fn from_cells(rows: u32, columns: u32, distances: Vec<u32>) -> Result<Self, SimulationError> {
        let expected = usize::try_from(u64::from(rows) * u64::from(columns)).unwrap_or(usize::MAX);
        if distances.len() != expected {
            return Err(SimulationError::FieldLength {
                expected,
                actual: distances.len(),
            });
        }

        Ok(Self {
            rows,
            columns,
            distances,
        })
    }

    /// Number of rows covered by the field.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns covered by the field.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Dimensions of the field as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Marker stored in cells that no source can reach.
    #[must_use]
    pub const fn sentinel(&self) -> u32 {
        self.rows.saturating_mul(self.columns)
    }

    /// Distance captured for the provided cell, if it lies within the field.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u32> {
        self.index(cell)
            .and_then(|index| self.distances.get(index).copied())
    }

    /// Reports whether the cell was reached by the search.
    #[must_use]
    pub fn is_reached(&self, cell: CellCoord) -> bool {
        self.distance(cell)
            .is_some_and(|distance| distance < self.sentinel())
    }

    /// Stores `distance` for the cell. Cells outside the field are ignored.
    pub fn set(&mut self, cell: CellCoord, distance: u32) {
        if let Some(slot) = self.index(cell).and_then(|index| self.distances.get_mut(index)) {
            *slot = distance;
        }
    }

    /// Dense distances stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.distances
    }

    /// Iterates the rows of the field from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u32]> {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.distances.chunks(width)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.row() >= self.rows || cell.column() >= self.columns {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Read-only view into the dense obstacle grid.
#[derive(Clone, Copy, Debug)]
pub struct ObstacleView<'a> {
    cells: &'a [bool],
    rows: u32,
    columns: u32,
}

impl<'a> ObstacleView<'a> {
    /// Captures a new view backed by the provided row-major cell slice, where
    /// `true` marks a full cell.
    #[must_use]
    pub fn new(cells: &'a [bool], rows: u32, columns: u32) -> Self {
        Self {
            cells,
            rows,
            columns,
        }
    }

    /// Provides the dimensions of the underlying grid as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Dense cells stored in row-major order, `true` marking a full cell.
    #[must_use]
    pub fn cells(&self) -> &'a [bool] {
        self.cells
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Reports whether the cell is inside the grid and free of obstacles.
    #[must_use]
    pub fn is_empty(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .is_some_and(|full| !full)
    }

    /// Enumerates in-bounds neighbors of `cell` under the given relation.
    pub fn neighbors(
        &self,
        cell: CellCoord,
        neighborhood: Neighborhood,
    ) -> impl Iterator<Item = CellCoord> {
        neighborhood.neighbors(cell, self.rows, self.columns)
    }

    /// Iterates the full cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = CellCoord> + 'a {
        let columns = self.columns.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, full)| **full)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                Some(CellCoord::new(index / columns, index % columns))
            })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

/// Reasons a simulation request may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The cell lies outside the configured grid.
    #[error("cell {cell} lies outside the {rows}x{columns} grid")]
    OutOfBounds {
        /// Cell named by the request.
        cell: CellCoord,
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
    /// The provided name does not denote a human or a zombie.
    #[error("'{0}' is not a valid entity kind; expected 'human' or 'zombie'")]
    InvalidEntityKind(String),
    /// An agent cannot be placed on an obstacle.
    #[error("cell {cell} is blocked by an obstacle")]
    Blocked {
        /// Cell named by the request.
        cell: CellCoord,
    },
    /// An obstacle cannot be placed underneath an agent.
    #[error("cell {cell} is occupied by an agent")]
    Occupied {
        /// Cell named by the request.
        cell: CellCoord,
    },
    /// A distance field was computed for a grid of different dimensions.
    #[error("distance field spans {actual:?} but the grid spans {expected:?}")]
    FieldDimensionMismatch {
        /// Dimensions of the grid as `(rows, columns)`.
        expected: (u32, u32),
        /// Dimensions of the supplied field as `(rows, columns)`.
        actual: (u32, u32),
    },
    /// Raw distances did not provide one entry per cell.
    #[error("distance field needs {expected} cells but {actual} were provided")]
    FieldLength {
        /// Number of cells in the grid.
        expected: usize,
        /// Number of distances supplied.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_and_entity_kind_survive_bincode() {
        assert_round_trip(&CellCoord::new(7, 3));
        assert_round_trip(&EntityKind::Zombie);
    }

    #[test]
    fn four_way_neighbors_follow_up_down_left_right_order() {
        let neighbors: Vec<_> = Neighborhood::FourWay
            .neighbors(CellCoord::new(1, 1), 3, 3)
            .collect();
        assert_eq!(
            neighbors,
            vec![
                CellCoord::new(0, 1),
                CellCoord::new(2, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 2),
            ]
        );
    }

    #[test]
    fn eight_way_neighbors_append_diagonals_after_orthogonals() {
        let neighbors: Vec<_> = Neighborhood::EightWay
            .neighbors(CellCoord::new(1, 1), 3, 3)
            .collect();
        assert_eq!(neighbors.len(), 8);
        assert_eq!(
            &neighbors[4..],
            &[
                CellCoord::new(0, 0),
                CellCoord::new(0, 2),
                CellCoord::new(2, 0),
                CellCoord::new(2, 2),
            ]
        );
    }

    #[test]
    fn neighbors_are_clipped_at_the_border() {
        let corner: Vec<_> = Neighborhood::EightWay
            .neighbors(CellCoord::new(0, 0), 3, 3)
            .collect();
        assert_eq!(
            corner,
            vec![
                CellCoord::new(1, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 1),
            ],
            "corner cells must not wrap around the grid"
        );

        let far_corner: Vec<_> = Neighborhood::FourWay
            .neighbors(CellCoord::new(2, 2), 3, 3)
            .collect();
        assert_eq!(far_corner, vec![CellCoord::new(1, 2), CellCoord::new(2, 1)]);
    }

    #[test]
    fn entity_kind_parses_case_insensitively() {
        assert_eq!("Human".parse::<EntityKind>(), Ok(EntityKind::Human));
        assert_eq!(" zombie ".parse::<EntityKind>(), Ok(EntityKind::Zombie));
        assert_eq!(
            "obstacle".parse::<EntityKind>(),
            Err(SimulationError::InvalidEntityKind("obstacle".to_owned()))
        );
    }

    #[test]
    fn unreached_field_uses_grid_area_as_sentinel() {
        let field = DistanceField::unreached(3, 4);
        assert_eq!(field.sentinel(), 12);
        assert!(field.cells().iter().all(|&distance| distance == 12));
        assert!(!field.is_reached(CellCoord::new(0, 0)));
        assert_eq!(field.distance(CellCoord::new(3, 0)), None);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        assert_eq!(
            DistanceField::from_cells(2, 2, vec![0, 1, 2]),
            Err(SimulationError::FieldLength {
                expected: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn obstacle_view_reports_out_of_bounds_cells_as_not_empty() {
        let cells = [false, true, false, false];
        let view = ObstacleView::new(&cells, 2, 2);
        assert!(view.is_empty(CellCoord::new(0, 0)));
        assert!(!view.is_empty(CellCoord::new(0, 1)));
        assert!(!view.is_empty(CellCoord::new(2, 0)));
        assert_eq!(view.obstacles().collect::<Vec<_>>(), vec![CellCoord::new(0, 1)]);
    }
}
