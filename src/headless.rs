/*
 * Headless Host Module
 *
 * A presentation host without a window. It feeds the driver a fixed dt, quits
 * after a tick budget, and keeps a summary of what the latest frame would have
 * drawn instead of drawing it. Memory use does not grow with the budget.
 */

use nannou::prelude::*;
use tracing::info;

use crate::driver::{Host, TickDriver};
use crate::flock::Flock;
use crate::params::FlockConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub agents_drawn: usize,
    pub centroid: Option<Point2>,
    /// Smallest axis-aligned box holding every drawn position, as (min, max).
    pub extent: Option<(Point2, Point2)>,
}

pub struct HeadlessHost {
    dt: f32,
    budget: u64,
    frames_completed: u64,
    last: Option<FrameSummary>,
    current: Vec<Point2>,
}

impl HeadlessHost {
    pub fn new(dt: f32, budget: u64) -> Self {
        Self {
            dt,
            budget,
            frames_completed: 0,
            last: None,
            current: Vec::new(),
        }
    }

    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }

    pub fn last_frame(&self) -> Option<&FrameSummary> {
        self.last.as_ref()
    }

    fn summarize(positions: &[Point2]) -> FrameSummary {
        if positions.is_empty() {
            return FrameSummary {
                agents_drawn: 0,
                centroid: None,
                extent: None,
            };
        }

        let mut min = positions[0];
        let mut max = positions[0];
        let mut sum = Vec2::ZERO;
        for &p in positions {
            min = min.min(p);
            max = max.max(p);
            sum += p;
        }

        FrameSummary {
            agents_drawn: positions.len(),
            centroid: Some(sum / positions.len() as f32),
            extent: Some((min, max)),
        }
    }
}

impl Host for HeadlessHost {
    fn elapsed(&mut self) -> f32 {
        self.dt
    }

    fn quit_requested(&mut self) -> bool {
        self.frames_completed >= self.budget
    }

    fn draw_agent(&mut self, position: Point2) {
        self.current.push(position);
    }

    fn end_frame(&mut self) {
        self.last = Some(Self::summarize(&self.current));
        self.frames_completed += 1;
        self.current.clear();
    }
}

/// Outcome of a headless run, as logged at the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessReport {
    pub ticks: u64,
    pub frames_completed: u64,
    pub last_frame: Option<FrameSummary>,
    pub mean_speed: f32,
}

/// Run `flock` for at most `ticks` ticks at the configured tick rate and log a summary.
pub fn run(config: &FlockConfig, flock: Flock, ticks: u64) -> HeadlessReport {
    let mut host = HeadlessHost::new(config.tick_seconds(), ticks);
    let mut driver = TickDriver::new(flock);
    let simulated = driver.run(&mut host);

    let report = HeadlessReport {
        ticks: simulated,
        frames_completed: host.frames_completed(),
        last_frame: host.last_frame().copied(),
        mean_speed: driver.flock().mean_speed(),
    };

    match report.last_frame {
        Some(frame) => info!(
            ticks = report.ticks,
            agents = frame.agents_drawn,
            centroid = ?frame.centroid,
            extent = ?frame.extent,
            mean_speed = report.mean_speed,
            "Headless run finished"
        ),
        None => info!(ticks = report.ticks, "Headless run finished without drawing"),
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quits_once_budget_is_spent() {
        let mut host = HeadlessHost::new(0.1, 2);
        assert!(!host.quit_requested());
        host.end_frame();
        assert!(!host.quit_requested());
        host.end_frame();
        assert!(host.quit_requested());
    }

    #[test]
    fn summarizes_each_frame() {
        let mut host = HeadlessHost::new(0.1, 1);
        host.draw_agent(pt2(0.0, 10.0));
        host.draw_agent(pt2(4.0, 2.0));
        host.end_frame();

        let frame = host.last_frame().copied().unwrap();
        assert_eq!(frame.agents_drawn, 2);
        assert_eq!(frame.centroid, Some(pt2(2.0, 6.0)));
        assert_eq!(frame.extent, Some((pt2(0.0, 2.0), pt2(4.0, 10.0))));
    }

    #[test]
    fn empty_frame_has_no_centroid() {
        let mut host = HeadlessHost::new(0.1, 1);
        host.end_frame();
        assert_eq!(host.last_frame().map(|frame| frame.centroid), Some(None));
    }

    #[test]
    fn keeps_only_the_latest_frame() {
        let mut host = HeadlessHost::new(0.1, 3);
        host.draw_agent(pt2(1.0, 1.0));
        host.end_frame();
        host.draw_agent(pt2(2.0, 2.0));
        host.draw_agent(pt2(4.0, 4.0));
        host.end_frame();

        assert_eq!(host.frames_completed(), 2);
        let frame = host.last_frame().copied().unwrap();
        assert_eq!(frame.agents_drawn, 2);
        assert_eq!(frame.centroid, Some(pt2(3.0, 3.0)));
        // Nothing drawn since the last frame ended is carried over.
        assert!(host.current.is_empty());
    }

    #[test]
    fn run_reports_the_final_frame() {
        let config = FlockConfig {
            seed: Some(9),
            ..FlockConfig::default()
        };
        let flock = Flock::new(&config).unwrap();
        let report = run(&config, flock, 5);

        assert_eq!(report.ticks, 5);
        assert_eq!(report.frames_completed, 5);
        let frame = report.last_frame.unwrap();
        assert_eq!(frame.agents_drawn, 100);
        assert!(frame.centroid.is_some());
        assert!(report.mean_speed.is_finite());
    }

    #[test]
    fn zero_tick_run_draws_nothing() {
        let config = FlockConfig {
            num_agents: 3,
            seed: Some(2),
            ..FlockConfig::default()
        };
        let report = run(&config, Flock::new(&config).unwrap(), 0);

        assert_eq!(report.ticks, 0);
        assert_eq!(report.last_frame, None);
    }
}
