//! Distance field builder used by the world crate.

use std::collections::VecDeque;

use log::debug;
use zombie_pursuit_core::{CellCoord, DistanceField};

use crate::grid::ObstacleGrid;

/// Runs a multi-source breadth-first search from every source cell.
///
/// Sources hold zero. Expansion is always 4-connected and never enters an
/// obstacle, so each reached cell holds its shortest obstacle-avoiding hop
/// count to the nearest source. Unreached cells keep the field's sentinel.
/// An empty source list therefore produces an all-sentinel field.
pub(crate) fn compute_distance_field(
    obstacles: &ObstacleGrid,
    sources: &[CellCoord],
) -> DistanceField {
    let (rows, columns) = obstacles.dimensions();
    let mut field = DistanceField::unreached(rows, columns);
    let mut visited = ObstacleGrid::new(rows, columns);
    let mut frontier = VecDeque::with_capacity(sources.len());

    for &source in sources {
        let _ = visited.fill(source);
        field.set(source, 0);
        frontier.push_back(source);
    }

    let mut reached = 0usize;
    while let Some(cell) = frontier.pop_front() {
        let Some(current_distance) = field.distance(cell) else {
            continue;
        };
        let next_distance = current_distance.saturating_add(1);

        for neighbor in obstacles.four_neighbors(cell) {
            if !matches!(obstacles.is_empty(neighbor), Ok(true)) {
                continue;
            }

            if !visited.fill(neighbor) {
                continue;
            }

            frontier.push_back(neighbor);
            let stored = field.distance(neighbor).unwrap_or(u32::MAX);
            field.set(neighbor, stored.min(next_distance));
            reached += 1;
        }
    }

    debug!(
        "distance field {}x{} seeded from {} sources reached {} further cells",
        rows,
        columns,
        sources.len(),
        reached
    );

    field
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_of(field: &DistanceField) -> Vec<Vec<u32>> {
        field.iter_rows().map(<[u32]>::to_vec).collect()
    }

    #[test]
    fn sources_hold_zero_and_layers_grow_by_one() {
        let grid = ObstacleGrid::new(3, 3);

        let field = compute_distance_field(&grid, &[CellCoord::new(0, 0)]);

        assert_eq!(
            rows_of(&field),
            vec![vec![0, 1, 2], vec![1, 2, 3], vec![2, 3, 4]]
        );
    }

    #[test]
    fn empty_source_list_leaves_every_cell_at_sentinel() {
        let grid = ObstacleGrid::new(3, 3);

        let field = compute_distance_field(&grid, &[]);

        assert!(field.cells().iter().all(|&distance| distance == 9));
    }

    #[test]
    fn search_routes_around_walls() {
        let mut grid = ObstacleGrid::new(3, 4);
        for row in 0..2 {
            grid.set_full(CellCoord::new(row, 1)).expect("in bounds");
        }

        let field = compute_distance_field(&grid, &[CellCoord::new(0, 0)]);

        assert_eq!(field.distance(CellCoord::new(0, 1)), Some(12), "walls keep the sentinel");
        assert_eq!(field.distance(CellCoord::new(2, 1)), Some(3));
        assert_eq!(field.distance(CellCoord::new(0, 2)), Some(6));
    }

    #[test]
    fn enclosed_pocket_keeps_sentinel() {
        let mut grid = ObstacleGrid::new(3, 3);
        for cell in [(0, 1), (1, 0), (1, 2), (2, 1)] {
            grid.set_full(CellCoord::from(cell)).expect("in bounds");
        }

        let field = compute_distance_field(&grid, &[CellCoord::new(0, 0)]);

        assert_eq!(field.distance(CellCoord::new(1, 1)), Some(9));
        assert_eq!(field.distance(CellCoord::new(2, 2)), Some(9));
        assert_eq!(field.distance(CellCoord::new(0, 0)), Some(0));
    }

    #[test]
    fn duplicate_sources_are_harmless() {
        let grid = ObstacleGrid::new(1, 4);
        let source = CellCoord::new(0, 3);

        let field = compute_distance_field(&grid, &[source, source]);

        assert_eq!(field.cells(), &[3, 2, 1, 0]);
    }
}
