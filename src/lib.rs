/*
 * Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the flocking simulation.
 * The steering model and tick driver are independent of any window; the
 * nannou host and the headless host both drive them through `driver::Host`.
 */

// Re-export key components for easier access
pub use agent::{limit, rescale, Agent};
pub use driver::{DriverState, Host, TickDriver};
pub use flock::Flock;
pub use headless::{FrameSummary, HeadlessHost, HeadlessReport};
pub use params::{Averaging, ConfigError, FlockConfig, SteeringParams};

// Define modules
pub mod agent;
pub mod app;
pub mod debug;
pub mod driver;
pub mod flock;
pub mod headless;
pub mod logging;
pub mod params;
pub mod ui;
