//! Kinematic Stand-In Simulator
//!
//! A deliberately small [`RigidBodySim`] implementation: ballistic
//! integration under gravity with damping, a flat ground plane, and a
//! time-based sleep policy. No contact solving, no tower baffles. It
//! exists so the resolution engine can be exercised end to end without
//! a physics crate; a production embedding implements the same trait
//! over a real engine.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::quat::Quat;
use crate::core::vec3::Vec3;

use super::body::{Aabb, BodyId, BodyState, OverlapEvent};
use super::simulator::RigidBodySim;

/// Tunables for the stand-in world.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KinematicConfig {
    /// Gravity acceleration
    pub gravity: Vec3,
    /// Linear damping factor per second
    pub linear_damping: f32,
    /// Angular damping factor per second
    pub angular_damping: f32,
    /// Height of the ground plane
    pub ground_height: f32,
    /// Resting height of a body center above the ground (die half-size)
    pub rest_height: f32,
    /// Velocity bleed applied per substep while grounded
    pub ground_friction: f32,
    /// Squared speed below which a body counts as motionless
    pub sleep_speed_squared: f32,
    /// Seconds of low motion before the sleep flag is set
    pub sleep_time: f32,
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -25.0, 0.0),
            linear_damping: 0.1,
            angular_damping: 0.4,
            ground_height: 0.0,
            rest_height: 0.5,
            ground_friction: 0.8,
            sleep_speed_squared: 0.01,
            sleep_time: 0.5,
        }
    }
}

#[derive(Clone, Debug)]
struct SimBody {
    state: BodyState,
    low_motion_time: f32,
}

/// Minimal rigid-body world: gravity, damping, ground plane, sleep.
#[derive(Clone, Debug, Default)]
pub struct KinematicSim {
    config: KinematicConfig,
    bodies: BTreeMap<BodyId, SimBody>,
    triggers: BTreeMap<BodyId, Aabb>,
    /// (trigger, body) pairs currently overlapping, for crossing detection
    inside: BTreeSet<(BodyId, BodyId)>,
    pending_events: Vec<OverlapEvent>,
}

impl KinematicSim {
    /// Create a world with default tunables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world with explicit tunables.
    pub fn with_config(config: KinematicConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Number of simulated bodies (triggers excluded).
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn integrate(&mut self, dt: f32) {
        let config = self.config;

        for body in self.bodies.values_mut() {
            if body.state.asleep {
                continue;
            }

            let state = &mut body.state;

            // Gravity, then exponential damping
            state.linear_velocity = state.linear_velocity + config.gravity.scale(dt);
            state.linear_velocity = state
                .linear_velocity
                .scale((1.0 - config.linear_damping).powf(dt));
            state.angular_velocity = state
                .angular_velocity
                .scale((1.0 - config.angular_damping).powf(dt));

            state.position = state.position + state.linear_velocity.scale(dt);

            // Ground plane: no penetration, no bounce
            let floor = config.ground_height + config.rest_height;
            if state.position.y <= floor {
                state.position.y = floor;
                if state.linear_velocity.y < 0.0 {
                    state.linear_velocity.y = 0.0;
                }
                state.linear_velocity = state.linear_velocity.scale(config.ground_friction);
                state.angular_velocity = state.angular_velocity.scale(config.ground_friction);
            }

            // Orientation integration: q' = q + dt/2 * (w ⊗ q)
            let w = state.angular_velocity;
            if w.length_squared() > 0.0 {
                let wq = Quat::new(w.x, w.y, w.z, 0.0) * state.orientation;
                let half_dt = 0.5 * dt;
                state.orientation = Quat::new(
                    state.orientation.x + wq.x * half_dt,
                    state.orientation.y + wq.y * half_dt,
                    state.orientation.z + wq.z * half_dt,
                    state.orientation.w + wq.w * half_dt,
                )
                .normalize();
            }

            // Sleep policy: sustained low motion sets the flag
            let motionless = state.linear_velocity.length_squared() < config.sleep_speed_squared
                && state.angular_velocity.length_squared() < config.sleep_speed_squared;
            if motionless {
                body.low_motion_time += dt;
                if body.low_motion_time >= config.sleep_time {
                    state.asleep = true;
                    state.linear_velocity = Vec3::ZERO;
                    state.angular_velocity = Vec3::ZERO;
                }
            } else {
                body.low_motion_time = 0.0;
            }
        }
    }

    fn detect_crossings(&mut self) {
        for (&trigger, volume) in &self.triggers {
            for (&body_id, body) in &self.bodies {
                let key = (trigger, body_id);
                if volume.contains(body.state.position) {
                    if self.inside.insert(key) {
                        self.pending_events.push(OverlapEvent {
                            trigger,
                            body: body_id,
                        });
                    }
                } else {
                    self.inside.remove(&key);
                }
            }
        }
    }
}

impl RigidBodySim for KinematicSim {
    fn add_body(&mut self, id: BodyId, state: BodyState) {
        self.bodies.insert(
            id,
            SimBody {
                state,
                low_motion_time: 0.0,
            },
        );
    }

    fn remove_body(&mut self, id: BodyId) {
        self.bodies.remove(&id);
        self.inside.retain(|&(_, body)| body != id);
    }

    fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    fn body_state(&self, id: BodyId) -> Option<&BodyState> {
        self.bodies.get(&id).map(|body| &body.state)
    }

    fn set_angular_velocity(&mut self, id: BodyId, angular_velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.state.angular_velocity = angular_velocity;
        }
    }

    fn wake(&mut self, id: BodyId) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.state.asleep = false;
            body.low_motion_time = 0.0;
        }
    }

    fn step(&mut self, fixed_dt: f32, real_dt: f32, max_substeps: u32) {
        if fixed_dt <= 0.0 || real_dt <= 0.0 {
            return;
        }

        let substeps = ((real_dt / fixed_dt).ceil() as u32).clamp(1, max_substeps);
        for _ in 0..substeps {
            self.integrate(fixed_dt);
        }
        self.detect_crossings();
    }

    fn add_trigger(&mut self, id: BodyId, volume: Aabb) {
        self.triggers.insert(id, volume);
    }

    fn drain_overlap_events(&mut self) -> Vec<OverlapEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
