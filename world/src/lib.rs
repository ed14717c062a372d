#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for the zombie pursuit grid.
//!
//! The [`World`] owns the obstacle grid and both agent lists. Drivers add
//! obstacles and agents, request distance fields, and advance the simulation
//! either phase by phase ([`World::move_humans`], [`World::move_zombies`]) or a
//! whole tick at a time with [`World::step`]. Movement decisions are delegated
//! to the pure policies in `zombie_pursuit_system_movement`; the world only
//! swaps their results in once they are complete.

mod grid;
mod navigation;

use log::{debug, warn};
use zombie_pursuit_core::{CellCoord, DistanceField, EntityKind, SimulationError};
use zombie_pursuit_system_movement::{chase, flee};

pub use grid::ObstacleGrid;

/// Default number of rows used by drivers that do not specify a grid.
pub const DEFAULT_ROWS: u32 = 30;
/// Default number of columns used by drivers that do not specify a grid.
pub const DEFAULT_COLUMNS: u32 = 40;

/// Summary of a completed tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StepReport {
    /// Number of humans whose cell changed during the tick.
    pub humans_moved: usize,
    /// Number of zombies whose cell changed during the tick.
    pub zombies_moved: usize,
}

/// Represents the authoritative pursuit simulation.
#[derive(Clone, Debug)]
pub struct World {
    obstacles: ObstacleGrid,
    humans: Vec<CellCoord>,
    zombies: Vec<CellCoord>,
}

impl World {
    /// Creates an empty simulation of the given size.
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        Self {
            obstacles: ObstacleGrid::new(rows, columns),
            humans: Vec::new(),
            zombies: Vec::new(),
        }
    }

    /// Creates a simulation populated with obstacles, zombies and humans.
    ///
    /// Obstacles are placed first, so agents listed on an obstacle cell are
    /// rejected with [`SimulationError::Blocked`].
    pub fn with_population<O, Z, H>(
        rows: u32,
        columns: u32,
        obstacles: O,
        zombies: Z,
        humans: H,
    ) -> Result<Self, SimulationError>
    where
        O: IntoIterator<Item = CellCoord>,
        Z: IntoIterator<Item = CellCoord>,
        H: IntoIterator<Item = CellCoord>,
    {
        let mut world = Self::new(rows, columns);
        for cell in obstacles {
            world.add_obstacle(cell)?;
        }
        for cell in zombies {
            world.add_zombie(cell)?;
        }
        for cell in humans {
            world.add_human(cell)?;
        }
        Ok(world)
    }

    /// Dimensions of the grid as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        self.obstacles.dimensions()
    }

    /// Resets obstacles to empty and removes every agent.
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.humans.clear();
        self.zombies.clear();
        debug!("world cleared");
    }

    /// Marks a cell as an obstacle.
    pub fn add_obstacle(&mut self, cell: CellCoord) -> Result<(), SimulationError> {
        if !self.obstacles.contains(cell) {
            return Err(self.reject(self.obstacles.out_of_bounds(cell)));
        }
        if self.humans.contains(&cell) || self.zombies.contains(&cell) {
            return Err(self.reject(SimulationError::Occupied { cell }));
        }
        self.obstacles.set_full(cell)
    }

    /// Turns an obstacle cell back into an empty cell.
    pub fn remove_obstacle(&mut self, cell: CellCoord) -> Result<(), SimulationError> {
        self.obstacles
            .set_empty(cell)
            .map_err(|error| self.reject(error))
    }

    /// Appends a human to the end of the human list.
    pub fn add_human(&mut self, cell: CellCoord) -> Result<(), SimulationError> {
        self.check_agent_cell(cell)?;
        self.humans.push(cell);
        Ok(())
    }

    /// Appends a zombie to the end of the zombie list.
    pub fn add_zombie(&mut self, cell: CellCoord) -> Result<(), SimulationError> {
        self.check_agent_cell(cell)?;
        self.zombies.push(cell);
        Ok(())
    }

    /// Reports whether the cell is free of obstacles.
    pub fn is_empty(&self, cell: CellCoord) -> Result<bool, SimulationError> {
        self.obstacles.is_empty(cell)
    }

    /// Number of humans in the simulation.
    #[must_use]
    pub fn num_humans(&self) -> usize {
        self.humans.len()
    }

    /// Number of zombies in the simulation.
    #[must_use]
    pub fn num_zombies(&self) -> usize {
        self.zombies.len()
    }

    /// Iterates the humans in the order they were added.
    ///
    /// The iterator borrows the current list, so it can be created again at
    /// any time and always reflects the latest positions.
    pub fn humans(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.humans.iter().copied()
    }

    /// Iterates the zombies in the order they were added.
    pub fn zombies(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.zombies.iter().copied()
    }

    /// Computes the distance from every cell to the nearest agent of `kind`.
    #[must_use]
    pub fn compute_distance_field(&self, kind: EntityKind) -> DistanceField {
        navigation::compute_distance_field(&self.obstacles, self.agents(kind))
    }

    /// Moves every human one step away from the zombies described by
    /// `zombie_field`.
    ///
    /// The human list is replaced only after every new position is known.
    pub fn move_humans(&mut self, zombie_field: &DistanceField) -> Result<(), SimulationError> {
        let next = flee(self.obstacles.view(), zombie_field, &self.humans)?;
        let _ = replace_agents(&mut self.humans, next);
        Ok(())
    }

    /// Moves every zombie one step toward the humans described by
    /// `human_field`.
    pub fn move_zombies(&mut self, human_field: &DistanceField) -> Result<(), SimulationError> {
        let next = chase(self.obstacles.view(), human_field, &self.zombies)?;
        let _ = replace_agents(&mut self.zombies, next);
        Ok(())
    }

    /// Advances the simulation by one tick.
    ///
    /// Both fields are computed from the positions at the start of the tick:
    /// humans flee from where the zombies are, and zombies chase where the
    /// humans were before they fled. Neither list changes unless both
    /// movement phases succeed.
    pub fn step(&mut self) -> Result<StepReport, SimulationError> {
        let zombie_field = self.compute_distance_field(EntityKind::Zombie);
        let human_field = self.compute_distance_field(EntityKind::Human);

        let obstacles = self.obstacles.view();
        let next_humans = flee(obstacles, &zombie_field, &self.humans)?;
        let next_zombies = chase(obstacles, &human_field, &self.zombies)?;

        let report = StepReport {
            humans_moved: replace_agents(&mut self.humans, next_humans),
            zombies_moved: replace_agents(&mut self.zombies, next_zombies),
        };
        debug!(
            "tick moved {} of {} humans and {} of {} zombies",
            report.humans_moved,
            self.humans.len(),
            report.zombies_moved,
            self.zombies.len()
        );
        Ok(report)
    }

    fn agents(&self, kind: EntityKind) -> &[CellCoord] {
        match kind {
            EntityKind::Human => &self.humans,
            EntityKind::Zombie => &self.zombies,
        }
    }

    fn check_agent_cell(&self, cell: CellCoord) -> Result<(), SimulationError> {
        match self.obstacles.is_empty(cell) {
            Ok(true) => Ok(()),
            Ok(false) => Err(self.reject(SimulationError::Blocked { cell })),
            Err(error) => Err(self.reject(error)),
        }
    }

    fn reject(&self, error: SimulationError) -> SimulationError {
        warn!("rejected world mutation: {error}");
        error
    }
}

/// Swaps in a fully planned list and reports how many agents changed cell.
fn replace_agents(agents: &mut Vec<CellCoord>, next: Vec<CellCoord>) -> usize {
    let moved = agents
        .iter()
        .zip(&next)
        .filter(|(before, after)| before != after)
        .count();
    *agents = next;
    moved
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use zombie_pursuit_core::ObstacleView;

    /// What a presenter should draw for a single cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum CellContents {
        /// Nothing occupies the cell.
        Empty,
        /// The cell is an obstacle.
        Obstacle,
        /// One or more humans and no zombies.
        Humans,
        /// One or more zombies and no humans.
        Zombies,
        /// Humans and zombies share the cell.
        Contested,
    }

    /// Exposes a read-only view of the obstacle grid.
    #[must_use]
    pub fn obstacle_view(world: &World) -> ObstacleView<'_> {
        world.obstacles.view()
    }

    /// Classifies every cell in row-major order.
    #[must_use]
    pub fn cell_contents(world: &World) -> Vec<CellContents> {
        let view = world.obstacles.view();
        let (_, columns) = view.dimensions();
        let columns = columns as usize;
        let mut tally = vec![(false, false); view.cells().len()];
        for cell in &world.humans {
            if let Some(slot) = tally.get_mut(cell.row() as usize * columns + cell.column() as usize) {
                slot.0 = true;
            }
        }
        for cell in &world.zombies {
            if let Some(slot) = tally.get_mut(cell.row() as usize * columns + cell.column() as usize) {
                slot.1 = true;
            }
        }

        view.cells()
            .iter()
            .zip(tally)
            .map(|(&full, occupants)| match (full, occupants) {
                (true, _) => CellContents::Obstacle,
                (false, (true, true)) => CellContents::Contested,
                (false, (true, false)) => CellContents::Humans,
                (false, (false, true)) => CellContents::Zombies,
                (false, (false, false)) => CellContents::Empty,
            })
            .collect()
    }
}
