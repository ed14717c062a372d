#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement policies that turn a distance field into next positions.
//!
//! Humans flee along the zombie distance field and zombies descend the human
//! distance field. Both policies read an immutable obstacle snapshot and return
//! a brand-new position list with the same length and order as the input, so
//! the caller can swap it in atomically.

use log::{debug, trace};
use zombie_pursuit_core::{CellCoord, DistanceField, Neighborhood, ObstacleView, SimulationError};

/// Greedy single-step rule applied to every agent of one population.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementPolicy {
    /// Step to the 8-connected neighbor farthest from the nearest zombie.
    Flee,
    /// Step to the 4-connected neighbor closest to the nearest human.
    Chase,
}

impl MovementPolicy {
    /// Neighbor relation the policy considers when choosing a step.
    #[must_use]
    pub const fn neighborhood(self) -> Neighborhood {
        match self {
            Self::Flee => Neighborhood::EightWay,
            Self::Chase => Neighborhood::FourWay,
        }
    }

    /// Whether `candidate` should replace the best distance seen so far.
    ///
    /// Equal distances qualify, so the last qualifying neighbor in iteration
    /// order wins a tie.
    #[must_use]
    pub const fn prefers(self, candidate: u32, best: u32) -> bool {
        match self {
            Self::Flee => candidate >= best,
            Self::Chase => candidate <= best,
        }
    }

    /// Plans the next position of every agent.
    ///
    /// Each agent starts with its own cell as the best choice and then scans
    /// its neighbors, only ever considering empty cells. The returned list is
    /// index-aligned with `agents`.
    pub fn plan(
        self,
        obstacles: ObstacleView<'_>,
        field: &DistanceField,
        agents: &[CellCoord],
    ) -> Result<Vec<CellCoord>, SimulationError> {
        if field.dimensions() != obstacles.dimensions() {
            return Err(SimulationError::FieldDimensionMismatch {
                expected: obstacles.dimensions(),
                actual: field.dimensions(),
            });
        }

        let next: Vec<CellCoord> = agents
            .iter()
            .map(|&agent| self.step(obstacles, field, agent))
            .collect();

        debug!(
            "{:?} planned {} agents, {} changed cell",
            self,
            next.len(),
            next.iter()
                .zip(agents)
                .filter(|(after, before)| after != before)
                .count()
        );

        Ok(next)
    }

    fn step(self, obstacles: ObstacleView<'_>, field: &DistanceField, agent: CellCoord) -> CellCoord {
        let mut best_cell = agent;
        let mut best_distance = field.distance(agent).unwrap_or_else(|| field.sentinel());

        for neighbor in obstacles.neighbors(agent, self.neighborhood()) {
            if !obstacles.is_empty(neighbor) {
                continue;
            }

            let Some(distance) = field.distance(neighbor) else {
                continue;
            };

            if self.prefers(distance, best_distance) {
                best_distance = distance;
                best_cell = neighbor;
            }
        }

        trace!("{self:?}: {agent} -> {best_cell} at distance {best_distance}");
        best_cell
    }
}

/// Moves every human one step away from the zombies.
pub fn flee(
    obstacles: ObstacleView<'_>,
    zombie_field: &DistanceField,
    humans: &[CellCoord],
) -> Result<Vec<CellCoord>, SimulationError> {
    MovementPolicy::Flee.plan(obstacles, zombie_field, humans)
}

/// Moves every zombie one step toward the humans.
pub fn chase(
    obstacles: ObstacleView<'_>,
    human_field: &DistanceField,
    zombies: &[CellCoord],
) -> Result<Vec<CellCoord>, SimulationError> {
    MovementPolicy::Chase.plan(obstacles, human_field, zombies)
}
