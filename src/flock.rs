/*
 * Flock Module
 *
 * This module owns the full agent collection and advances it one tick at a time.
 * Every agent is visited in index order: wrapped into the viewport, steered
 * against the whole flock, then integrated. Agents are updated in place, so an
 * agent late in the pass already sees the new state of the agents before it.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::agent::Agent;
use crate::params::{ConfigError, FlockConfig, SteeringParams};

#[derive(Debug, Clone)]
pub struct Flock {
    agents: Vec<Agent>,
    width: f32,
    height: f32,
    steering: SteeringParams,
}

impl Flock {
    /// Spawn `config.num_agents` agents at random, seeded when `config.seed` is set.
    pub fn new(config: &FlockConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (width, height) = config.bounds();

        let agents: Vec<Agent> = (0..config.num_agents)
            .map(|_| {
                Agent::random(
                    &mut rng,
                    width,
                    height,
                    config.initial_speed,
                    &config.steering,
                )
            })
            .collect();

        info!(
            agents = agents.len(),
            width = config.width,
            height = config.height,
            seed = ?config.seed,
            averaging = %config.steering.averaging,
            "Spawned flock"
        );

        Ok(Self {
            agents,
            width,
            height,
            steering: config.steering.clone(),
        })
    }

    /// Build a flock from hand-placed agents.
    pub fn from_agents(
        agents: Vec<Agent>,
        width: f32,
        height: f32,
        steering: SteeringParams,
    ) -> Self {
        Self {
            agents,
            width,
            height,
            steering,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn steering(&self) -> &SteeringParams {
        &self.steering
    }

    /// Swap in new steering constants, pushing max_mag and max_force down to
    /// every agent.
    pub fn retune(&mut self, steering: SteeringParams) {
        for agent in &mut self.agents {
            agent.max_mag = steering.max_mag;
            agent.max_force = steering.max_force;
        }
        debug!(?steering, "Retuned flock");
        self.steering = steering;
    }

    // Wrap, steer and integrate the agent at `index`
    pub fn step_agent(&mut self, index: usize, dt: f32) {
        self.agents[index].out_of_bounds(self.width, self.height);
        Agent::follow(&mut self.agents, index, &self.steering);
        self.agents[index].update(dt);
    }

    // Advance every agent by one tick, in index order
    pub fn step(&mut self, dt: f32) {
        for index in 0..self.agents.len() {
            self.step_agent(index, dt);
        }
    }

    // Wrap every agent without steering; used before the first draw
    pub fn wrap_all(&mut self) {
        for agent in &mut self.agents {
            agent.out_of_bounds(self.width, self.height);
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Point2> + '_ {
        self.agents.iter().map(|agent| agent.position)
    }

    pub fn centroid(&self) -> Option<Point2> {
        if self.agents.is_empty() {
            return None;
        }
        let sum = self.positions().fold(Vec2::ZERO, |acc, p| acc + p);
        Some(sum / self.agents.len() as f32)
    }

    pub fn mean_speed(&self) -> f32 {
        if self.agents.is_empty() {
            return 0.0;
        }
        let total: f32 = self.agents.iter().map(|agent| agent.velocity.length()).sum();
        total / self.agents.len() as f32
    }
}
