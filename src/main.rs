/*
 * Flocking Simulation
 *
 * This application simulates the flocking behaviour of autonomous agents based on three rules:
 * 1. Alignment: Match the heading of nearby agents
 * 2. Cohesion: Steer towards the centre of nearby agents
 * 3. Separation: Steer away from agents that are too close
 *
 * By default a window shows the flock with an optional tuning panel. With
 * `--headless` the same simulation runs for a fixed number of ticks and logs a
 * summary instead.
 */

use anyhow::{Context, Result};
use clap::Parser;

use flocking::{app, headless, logging, Averaging, Flock, FlockConfig, SteeringParams};

#[derive(Debug, Parser)]
#[command(name = "flocking", about = "Steering-behaviour flocking simulation")]
struct Cli {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Number of agents in the flock
    #[arg(long, default_value_t = 100)]
    agents: usize,

    /// Target ticks per second
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,

    /// Seed for the initial population
    #[arg(long)]
    seed: Option<u64>,

    /// How behaviour sums are averaged: `reference` or `neighbors`
    #[arg(long, default_value_t = Averaging::Reference)]
    averaging: Averaging,

    /// Run without a window
    #[arg(long)]
    headless: bool,

    /// Number of ticks to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Hide the tuning panel
    #[arg(long)]
    no_panel: bool,
}

impl Cli {
    fn config(&self) -> FlockConfig {
        FlockConfig {
            width: self.width,
            height: self.height,
            num_agents: self.agents,
            tick_rate: self.tick_rate,
            seed: self.seed,
            steering: SteeringParams {
                averaging: self.averaging,
                ..SteeringParams::default()
            },
            ..FlockConfig::default()
        }
    }
}

fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();
    let config = cli.config();

    let flock = Flock::new(&config).context("invalid simulation configuration")?;

    if cli.headless {
        headless::run(&config, flock, cli.ticks);
    } else {
        app::run(config, flock, !cli.no_panel)?;
    }

    Ok(())
}
