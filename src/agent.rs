/*
 * Agent Module
 *
 * This module defines the Agent struct, its kinematics and its steering behaviours.
 * Each agent combines three local rules into a single acceleration every tick:
 * 1. Alignment: Steer towards the average velocity of neighbours
 * 2. Cohesion: Steer towards the average position of neighbours
 * 3. Separation: Steer away from neighbours, harder the closer they are
 *
 * Neighbours are found by a brute-force scan of the whole flock. Distances are
 * flat Euclidean, so agents on opposite edges of the viewport never see each
 * other even though they are adjacent after wrapping.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::{Averaging, SteeringParams};

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Point2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub max_mag: f32,
    pub max_force: f32,
}

impl Agent {
    pub fn new(position: Point2, velocity: Vec2, params: &SteeringParams) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            max_mag: params.max_mag,
            max_force: params.max_force,
        }
    }

    /// Spawn an agent uniformly over the viewport with a velocity drawn from
    /// `-speed..=speed` on each axis.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f32,
        height: f32,
        speed: f32,
        params: &SteeringParams,
    ) -> Self {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        let vx = rng.gen_range(-speed..=speed);
        let vy = rng.gen_range(-speed..=speed);

        Self::new(pt2(x, y), vec2(vx, vy), params)
    }

    // Integrate one tick. Position moves with the velocity from before this tick.
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.velocity += self.acceleration * dt;
    }

    // Wrap the agent around the viewport edges
    pub fn out_of_bounds(&mut self, width: f32, height: f32) {
        if self.position.x >= width {
            self.position.x = 0.0;
        } else if self.position.x < 0.0 {
            self.position.x = width;
        }

        if self.position.y >= height {
            self.position.y = 0.0;
        } else if self.position.y < 0.0 {
            self.position.y = height;
        }
    }

    /// Visit every other agent of `group` strictly inside `fov`, along with
    /// its distance. `index` is this agent's slot in `group` and is skipped.
    pub fn neighbors<'a>(
        &'a self,
        index: usize,
        group: &'a [Agent],
        fov: f32,
    ) -> impl Iterator<Item = (&'a Agent, f32)> + 'a {
        group
            .iter()
            .enumerate()
            .filter(move |&(i, _)| i != index)
            .map(move |(_, other)| (other, self.position.distance(other.position)))
            .filter(move |&(_, d)| d < fov)
    }

    // Steer towards the average heading of neighbours
    pub fn align(&self, index: usize, group: &[Agent], fov: f32, averaging: Averaging) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0usize;

        for (other, _) in self.neighbors(index, group, fov) {
            sum += other.velocity;
            count += 1;
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        let divisor = match averaging {
            Averaging::Reference => group.len(),
            Averaging::Neighbors => count,
        };
        let average = sum / divisor as f32;

        rescale(average, self.max_mag) - self.velocity
    }

    // Steer towards the average position of neighbours
    pub fn cohesion(&self, index: usize, group: &[Agent], fov: f32) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0usize;

        for (other, _) in self.neighbors(index, group, fov) {
            sum += other.position;
            count += 1;
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        // Cohesion always averages over matched neighbours.
        let centre = sum / count as f32;
        let desired = centre - self.position;

        rescale(desired, self.max_mag) - self.velocity
    }

    // Steer away from neighbours, weighting each push by inverse distance
    pub fn separation(
        &self,
        index: usize,
        group: &[Agent],
        fov: f32,
        averaging: Averaging,
    ) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0usize;

        for (other, d) in self.neighbors(index, group, fov) {
            // A coincident agent gives no direction to flee in.
            if d <= 0.0 {
                continue;
            }
            let away = (self.position - other.position) / d;
            sum += away / d;
            count += 1;
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        let divisor = match averaging {
            Averaging::Reference => group.len(),
            Averaging::Neighbors => count,
        };
        let average = sum / divisor as f32;

        limit(rescale(average, self.max_mag) - self.velocity, self.max_force)
    }

    /// Weighted combination of the three behaviours for the agent at `index`.
    pub fn steering(&self, index: usize, group: &[Agent], params: &SteeringParams) -> Vec2 {
        let align = self.align(index, group, params.align_fov, params.averaging);
        let cohesion = self.cohesion(index, group, params.cohesion_fov);
        let separation = self.separation(index, group, params.separation_fov, params.averaging);

        align * params.align_weight
            + cohesion * params.cohesion_weight
            + separation * params.separation_weight
    }

    /// Recompute the acceleration of `group[index]` from the current state of
    /// `group`. Nothing from the previous tick's acceleration survives.
    pub fn follow(group: &mut [Agent], index: usize, params: &SteeringParams) {
        let steering = {
            let group: &[Agent] = group;
            group[index].steering(index, group, params)
        };
        let agent = &mut group[index];
        agent.acceleration = Vec2::ZERO;
        agent.acceleration += steering;
    }
}

/// Scale `vector` to `magnitude` without changing its direction. The zero
/// vector has no direction and stays zero.
pub fn rescale(vector: Vec2, magnitude: f32) -> Vec2 {
    let length = vector.length();
    if length > 0.0 {
        vector * (magnitude / length)
    } else {
        Vec2::ZERO
    }
}

/// Cap the magnitude of `vector` at `n_max`.
pub fn limit(vector: Vec2, n_max: f32) -> Vec2 {
    let length = vector.length();
    if length > n_max && length > 0.0 {
        vector * (n_max / length)
    } else {
        vector
    }
}
