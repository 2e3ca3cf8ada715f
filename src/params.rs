/*
 * Simulation Parameters Module
 *
 * This module defines the configuration for a flocking run. FlockConfig holds
 * the run-level settings supplied once at start-up (viewport, population,
 * tick rate), while SteeringParams holds the per-behaviour constants that the
 * tuning panel may adjust while the simulation is running.
 */

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use thiserror::Error;

/// Errors reported when a configuration cannot drive a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("viewport must be at least 1x1, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("tick rate must be positive")]
    ZeroTickRate,
    #[error("{name} field of view must be positive and finite, got {value}")]
    InvalidFov { name: &'static str, value: f32 },
    #[error("{name} must be non-negative and finite, got {value}")]
    InvalidScalar { name: &'static str, value: f32 },
    #[error("initial speed range must be positive and finite, got {0}")]
    InvalidSpeedRange(f32),
}

/// Divisor used when averaging a behaviour's accumulated sum.
///
/// `Reference` keeps the historical mix: alignment and separation divide by
/// the whole population while cohesion divides by the matched neighbour count.
/// `Neighbors` divides every behaviour by the matched neighbour count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Averaging {
    #[default]
    Reference,
    Neighbors,
}

impl fmt::Display for Averaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Averaging::Reference => f.write_str("reference"),
            Averaging::Neighbors => f.write_str("neighbors"),
        }
    }
}

impl FromStr for Averaging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" => Ok(Averaging::Reference),
            "neighbors" | "neighbours" => Ok(Averaging::Neighbors),
            other => Err(format!("unknown averaging mode `{other}`")),
        }
    }
}

// Constants for the three steering behaviours
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringParams {
    pub align_fov: f32,
    pub cohesion_fov: f32,
    pub separation_fov: f32,
    pub align_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    /// Magnitude every steering vector is rescaled to before weighting.
    pub max_mag: f32,
    /// Hard clamp on the separation contribution.
    pub max_force: f32,
    pub averaging: Averaging,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            align_fov: 100.0,
            cohesion_fov: 100.0,
            separation_fov: 100.0,
            align_weight: 1.0,
            cohesion_weight: 0.5,
            separation_weight: 1.0,
            max_mag: 300.0,
            max_force: 100.0,
            averaging: Averaging::Reference,
        }
    }
}

impl SteeringParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("align", self.align_fov),
            ("cohesion", self.cohesion_fov),
            ("separation", self.separation_fov),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidFov { name, value });
            }
        }

        for (name, value) in [
            ("align_weight", self.align_weight),
            ("cohesion_weight", self.cohesion_weight),
            ("separation_weight", self.separation_weight),
            ("max_mag", self.max_mag),
            ("max_force", self.max_force),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidScalar { name, value });
            }
        }

        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_fov_range() -> RangeInclusive<f32> {
        10.0..=400.0
    }

    pub fn get_weight_range() -> RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn get_max_mag_range() -> RangeInclusive<f32> {
        10.0..=1000.0
    }

    pub fn get_max_force_range() -> RangeInclusive<f32> {
        1.0..=500.0
    }
}

/// Run-level configuration, fixed for the lifetime of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlockConfig {
    pub width: u32,
    pub height: u32,
    pub num_agents: usize,
    /// Target ticks per second; pacing is enforced by the host.
    pub tick_rate: u32,
    /// Initial velocity components are drawn from `-initial_speed..=initial_speed`.
    pub initial_speed: f32,
    pub marker_radius: f32,
    pub seed: Option<u64>,
    pub steering: SteeringParams,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            num_agents: 100,
            tick_rate: 60,
            initial_speed: 100.0,
            marker_radius: 7.0,
            seed: None,
            steering: SteeringParams::default(),
        }
    }
}

impl FlockConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if !(self.initial_speed.is_finite() && self.initial_speed > 0.0) {
            return Err(ConfigError::InvalidSpeedRange(self.initial_speed));
        }
        if !(self.marker_radius.is_finite() && self.marker_radius >= 0.0) {
            return Err(ConfigError::InvalidScalar {
                name: "marker_radius",
                value: self.marker_radius,
            });
        }
        self.steering.validate()
    }

    /// Viewport as floating-point world bounds.
    pub fn bounds(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    /// Fixed step matching the target tick rate, in seconds.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}
