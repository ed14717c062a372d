//! Dense boolean occupancy grid that stores obstacle cells.

use zombie_pursuit_core::{CellCoord, Neighborhood, ObstacleView, SimulationError};

/// Fixed-size grid of empty and full cells.
///
/// Dimensions are immutable after construction; [`ObstacleGrid::clear`] only
/// resets the contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObstacleGrid {
    rows: u32,
    columns: u32,
    cells: Vec<bool>,
}

impl ObstacleGrid {
    /// Creates a grid where every cell is empty.
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        let capacity_u64 = u64::from(rows) * u64::from(columns);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![false; capacity],
        }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Dimensions of the grid as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Marks the cell as full.
    pub fn set_full(&mut self, cell: CellCoord) -> Result<(), SimulationError> {
        let index = self.checked_index(cell)?;
        self.cells[index] = true;
        Ok(())
    }

    /// Marks the cell as empty.
    pub fn set_empty(&mut self, cell: CellCoord) -> Result<(), SimulationError> {
        let index = self.checked_index(cell)?;
        self.cells[index] = false;
        Ok(())
    }

    /// Reports whether the cell is empty.
    pub fn is_empty(&self, cell: CellCoord) -> Result<bool, SimulationError> {
        let index = self.checked_index(cell)?;
        Ok(!self.cells[index])
    }

    /// Reports whether the cell is full.
    pub fn is_full(&self, cell: CellCoord) -> Result<bool, SimulationError> {
        self.is_empty(cell).map(|empty| !empty)
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Orthogonal neighbors of `cell`, clipped to the grid.
    pub fn four_neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        Neighborhood::FourWay.neighbors(cell, self.rows, self.columns)
    }

    /// Orthogonal and diagonal neighbors of `cell`, clipped to the grid.
    pub fn eight_neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        Neighborhood::EightWay.neighbors(cell, self.rows, self.columns)
    }

    /// Captures a read-only view of the grid.
    #[must_use]
    pub fn view(&self) -> ObstacleView<'_> {
        ObstacleView::new(&self.cells, self.rows, self.columns)
    }

    /// Fills an in-bounds empty cell, returning whether anything changed.
    pub(crate) fn fill(&mut self, cell: CellCoord) -> bool {
        match self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    pub(crate) fn out_of_bounds(&self, cell: CellCoord) -> SimulationError {
        SimulationError::OutOfBounds {
            cell,
            rows: self.rows,
            columns: self.columns,
        }
    }

    fn checked_index(&self, cell: CellCoord) -> Result<usize, SimulationError> {
        self.index(cell).ok_or_else(|| self.out_of_bounds(cell))
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
