/*
 * Debug Information Module
 *
 * Frame statistics shown in the tuning panel.
 */

use std::time::Duration;

use crate::driver::TickDriver;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks: u64,
    pub agents: usize,
    pub mean_speed: f32,
}

impl DebugInfo {
    // Refresh the simulation-side figures from the driver
    pub fn sample(&mut self, driver: &TickDriver) {
        self.ticks = driver.ticks();
        self.agents = driver.flock().len();
        self.mean_speed = driver.flock().mean_speed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flock::Flock;
    use crate::params::FlockConfig;

    #[test]
    fn sample_reads_the_driver() {
        let config = FlockConfig {
            num_agents: 12,
            seed: Some(3),
            ..FlockConfig::default()
        };
        let driver = TickDriver::new(Flock::new(&config).unwrap());
        let mut info = DebugInfo::default();
        info.sample(&driver);

        assert_eq!(info.agents, 12);
        assert_eq!(info.ticks, 0);
        assert!(info.mean_speed > 0.0);
    }
}
