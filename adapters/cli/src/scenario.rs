//! Scenario files describing the initial state of a simulation run.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use zombie_pursuit_core::CellCoord;
use zombie_pursuit_world::{World, DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Number of ticks simulated when neither the scenario nor the flags say otherwise.
pub(crate) const DEFAULT_TICKS: u32 = 10;

/// Initial grid, obstacle and agent layout loaded from TOML.
///
/// Cells are written as `[row, column]` pairs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    #[serde(default = "default_rows")]
    pub(crate) rows: u32,
    #[serde(default = "default_columns")]
    pub(crate) columns: u32,
    #[serde(default)]
    pub(crate) ticks: Option<u32>,
    #[serde(default)]
    pub(crate) obstacles: Vec<(u32, u32)>,
    #[serde(default)]
    pub(crate) zombies: Vec<(u32, u32)>,
    #[serde(default)]
    pub(crate) humans: Vec<(u32, u32)>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            ticks: None,
            obstacles: Vec::new(),
            zombies: Vec::new(),
            humans: Vec::new(),
        }
    }
}

impl Scenario {
    /// Reads and parses a scenario file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse scenario at {}", path.display()))
    }

    /// Parses scenario TOML.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("scenario is not valid TOML")
    }

    /// Replaces file values with the ones supplied on the command line.
    #[must_use]
    pub(crate) fn with_overrides(
        mut self,
        rows: Option<u32>,
        columns: Option<u32>,
        ticks: Option<u32>,
    ) -> Self {
        if let Some(rows) = rows {
            self.rows = rows;
        }
        if let Some(columns) = columns {
            self.columns = columns;
        }
        if ticks.is_some() {
            self.ticks = ticks;
        }
        self
    }

    /// Number of ticks the run should simulate.
    #[must_use]
    pub(crate) fn tick_count(&self) -> u32 {
        self.ticks.unwrap_or(DEFAULT_TICKS)
    }

    /// Builds the world described by the scenario.
    pub(crate) fn build_world(&self) -> Result<World> {
        let to_cells = |pairs: &[(u32, u32)]| -> Vec<CellCoord> {
            pairs.iter().copied().map(CellCoord::from).collect()
        };

        World::with_population(
            self.rows,
            self.columns,
            to_cells(&self.obstacles),
            to_cells(&self.zombies),
            to_cells(&self.humans),
        )
        .context("scenario places an obstacle or agent on an invalid cell")
    }
}

fn default_rows() -> u32 {
    DEFAULT_ROWS
}

fn default_columns() -> u32 {
    DEFAULT_COLUMNS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_corridor_scenario_parses() {
        let scenario = Scenario::parse(include_str!("../scenarios/corridor.toml"))
            .expect("bundled scenario parses");
        let world = scenario.build_world().expect("bundled scenario is valid");

        assert_eq!(world.dimensions(), (scenario.rows, scenario.columns));
        assert_eq!(world.num_humans(), scenario.humans.len());
        assert_eq!(world.num_zombies(), scenario.zombies.len());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let scenario = Scenario::parse("humans = [[1, 2]]").expect("parses");

        assert_eq!(scenario.rows, DEFAULT_ROWS);
        assert_eq!(scenario.columns, DEFAULT_COLUMNS);
        assert_eq!(scenario.tick_count(), DEFAULT_TICKS);
        assert_eq!(scenario.humans, vec![(1, 2)]);
    }

    #[test]
    fn overrides_replace_file_values() {
        let scenario = Scenario::parse("rows = 4\ncolumns = 4\nticks = 3")
            .expect("parses")
            .with_overrides(Some(8), None, Some(12));

        assert_eq!((scenario.rows, scenario.columns), (8, 4));
        assert_eq!(scenario.tick_count(), 12);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Scenario::parse("walls = [[0, 0]]").is_err());
    }

    #[test]
    fn agents_outside_the_grid_fail_to_build() {
        let scenario = Scenario::parse("rows = 2\ncolumns = 2\nzombies = [[2, 0]]").expect("parses");

        assert!(scenario.build_world().is_err());
    }
}
