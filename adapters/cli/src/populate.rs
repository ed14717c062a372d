//! Seeded random scattering of obstacles and agents.

use log::warn;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use zombie_pursuit_core::{CellCoord, SimulationError};
use zombie_pursuit_world::{query, World};

/// Seed used when the command line does not provide one.
pub(crate) const DEFAULT_SEED: u64 = 0x2d5e_71a9_c03b_88f4;

/// How many of each kind to scatter onto the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Scatter {
    pub(crate) obstacles: usize,
    pub(crate) zombies: usize,
    pub(crate) humans: usize,
}

impl Scatter {
    /// Places obstacles first, then zombies, then humans.
    ///
    /// Obstacles only land on cells free of obstacles and agents; agents land
    /// on any empty cell and may share one.
    pub(crate) fn apply(self, world: &mut World, seed: u64) -> Result<(), SimulationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut free = unoccupied_cells(world);
        free.shuffle(&mut rng);
        if free.len() < self.obstacles {
            warn!(
                "only {} free cells available for {} requested obstacles",
                free.len(),
                self.obstacles
            );
        }
        for cell in free.into_iter().take(self.obstacles) {
            world.add_obstacle(cell)?;
        }

        let empty = empty_cells(world);
        if empty.is_empty() {
            if self.zombies + self.humans > 0 {
                warn!("no empty cells left to scatter agents onto");
            }
            return Ok(());
        }
        for _ in 0..self.zombies {
            if let Some(&cell) = empty.choose(&mut rng) {
                world.add_zombie(cell)?;
            }
        }
        for _ in 0..self.humans {
            if let Some(&cell) = empty.choose(&mut rng) {
                world.add_human(cell)?;
            }
        }
        Ok(())
    }
}

fn all_cells(world: &World) -> impl Iterator<Item = CellCoord> {
    let (rows, columns) = world.dimensions();
    (0..rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(row, column)))
}

fn empty_cells(world: &World) -> Vec<CellCoord> {
    let view = query::obstacle_view(world);
    all_cells(world).filter(|cell| view.is_empty(*cell)).collect()
}

fn unoccupied_cells(world: &World) -> Vec<CellCoord> {
    let mut occupied: Vec<CellCoord> = world.humans().chain(world.zombies()).collect();
    occupied.sort_unstable();
    empty_cells(world)
        .into_iter()
        .filter(|cell| occupied.binary_search(cell).is_err())
        .collect()
}
