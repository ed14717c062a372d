#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the zombie pursuit simulation.

mod populate;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use zombie_pursuit_core::EntityKind;
use zombie_pursuit_rendering::{render_field, render_world};
use zombie_pursuit_world::World;

use crate::populate::{Scatter, DEFAULT_SEED};
use crate::scenario::Scenario;

/// Simulates zombies chasing humans across a grid with obstacles.
#[derive(Debug, Parser)]
#[command(name = "zombie-pursuit", version, about)]
struct CliArgs {
    /// TOML scenario describing the grid, obstacles and agents.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,
    /// Number of grid rows; overrides the scenario.
    #[arg(long)]
    rows: Option<u32>,
    /// Number of grid columns; overrides the scenario.
    #[arg(long)]
    columns: Option<u32>,
    /// Number of ticks to simulate; overrides the scenario.
    #[arg(long)]
    ticks: Option<u32>,
    /// Obstacles to scatter at random onto free cells.
    #[arg(long, default_value_t = 0)]
    obstacles: usize,
    /// Zombies to scatter at random onto empty cells.
    #[arg(long, default_value_t = 0)]
    zombies: usize,
    /// Humans to scatter at random onto empty cells.
    #[arg(long, default_value_t = 0)]
    humans: usize,
    /// Seed for the random scatter.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Print the distance field of `human` or `zombie` agents and exit.
    #[arg(long, value_name = "KIND")]
    field: Option<EntityKind>,
    /// Only print the final frame.
    #[arg(long)]
    quiet: bool,
}

/// Entry point for the zombie pursuit command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let scenario = match &args.scenario {
        Some(path) => {
            info!("loading scenario from {}", path.display());
            Scenario::load(path)?
        }
        None => Scenario::default(),
    }
    .with_overrides(args.rows, args.columns, args.ticks);

    let mut world = scenario.build_world()?;
    Scatter {
        obstacles: args.obstacles,
        zombies: args.zombies,
        humans: args.humans,
    }
    .apply(&mut world, args.seed)
    .context("failed to scatter obstacles and agents")?;

    let (rows, columns) = world.dimensions();
    info!(
        "simulating {}x{} grid with {} humans and {} zombies",
        rows,
        columns,
        world.num_humans(),
        world.num_zombies()
    );

    if let Some(kind) = args.field {
        print!("{}", render_field(&world.compute_distance_field(kind)));
        return Ok(());
    }

    run(&mut world, scenario.tick_count(), args.quiet)
}

fn run(world: &mut World, ticks: u32, quiet: bool) -> Result<()> {
    if !quiet {
        print_frame(world, 0);
    }

    for tick in 1..=ticks {
        let report = world
            .step()
            .with_context(|| format!("tick {tick} failed"))?;
        info!(
            "tick {tick}: {} humans and {} zombies changed cell",
            report.humans_moved, report.zombies_moved
        );
        if !quiet {
            print_frame(world, tick);
        }
        if report.humans_moved == 0 && report.zombies_moved == 0 {
            info!("simulation settled after {tick} ticks");
            if quiet {
                print_frame(world, tick);
            }
            return Ok(());
        }
    }

    if quiet {
        print_frame(world, ticks);
    }
    Ok(())
}

fn print_frame(world: &World, tick: u32) {
    println!("tick {tick}");
    print!("{}", render_world(world));
    println!();
}
