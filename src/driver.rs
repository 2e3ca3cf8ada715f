/*
 * Tick Driver Module
 *
 * This module runs the simulation loop against a presentation host. The host
 * owns the clock, the quit signal and the drawing surface; the driver only
 * asks it for dt, steps the flock, and hands every agent's position back.
 * Frame pacing happens inside the host's `end_frame`.
 */

use nannou::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::flock::Flock;

// How often the driver emits a debug summary
const SUMMARY_EVERY_TICKS: u64 = 600;

/// The narrow boundary between the simulation and whatever shows it.
pub trait Host {
    /// Seconds elapsed since the previous tick.
    fn elapsed(&mut self) -> f32;

    fn quit_requested(&mut self) -> bool;

    fn draw_agent(&mut self, position: Point2);

    /// Yield to the host's frame pacing once a tick is fully drawn.
    fn end_frame(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

pub struct TickDriver {
    flock: Flock,
    state: DriverState,
    paused: bool,
    ticks: u64,
}

impl TickDriver {
    pub fn new(flock: Flock) -> Self {
        Self {
            flock,
            state: DriverState::Running,
            paused: false,
            ticks: 0,
        }
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn flock_mut(&mut self) -> &mut Flock {
        &mut self.flock
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Ticks actually simulated; paused ticks are not counted.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, tick = self.ticks, "Pause toggled");
        }
        self.paused = paused;
    }

    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            info!(ticks = self.ticks, "Simulation stopped");
        }
        self.state = DriverState::Stopped;
    }

    /// Run a single iteration of the loop against `host`.
    pub fn tick<H: Host + ?Sized>(&mut self, host: &mut H) -> DriverState {
        if self.state == DriverState::Stopped {
            return DriverState::Stopped;
        }

        if host.quit_requested() {
            self.stop();
            return DriverState::Stopped;
        }

        let mut dt = host.elapsed();
        if !(dt.is_finite() && dt >= 0.0) {
            warn!(dt, "Host reported an unusable dt; using 0");
            dt = 0.0;
        }

        if self.paused {
            for position in self.flock.positions() {
                host.draw_agent(position);
            }
        } else {
            for index in 0..self.flock.len() {
                self.flock.step_agent(index, dt);
                host.draw_agent(self.flock.agents()[index].position);
            }
            self.ticks += 1;
            trace!(tick = self.ticks, dt, "Tick");

            if self.ticks % SUMMARY_EVERY_TICKS == 0 {
                debug!(
                    tick = self.ticks,
                    mean_speed = self.flock.mean_speed(),
                    centroid = ?self.flock.centroid(),
                    "Flock summary"
                );
            }
        }

        host.end_frame();
        DriverState::Running
    }

    /// Loop until the host asks to quit. Returns the number of ticks simulated.
    pub fn run<H: Host + ?Sized>(&mut self, host: &mut H) -> u64 {
        info!(agents = self.flock.len(), "Simulation running");
        while self.tick(host) == DriverState::Running {}
        self.ticks
    }
}
