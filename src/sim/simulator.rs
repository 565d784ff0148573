//! Simulator Contract
//!
//! The narrow interface the resolution engine consumes from whatever
//! rigid-body engine hosts the tower. The engine never steps physics
//! itself; it reads post-step body state and drains trigger events.

use crate::core::vec3::Vec3;

use super::body::{Aabb, BodyId, BodyState, OverlapEvent};

/// A rigid-body simulator hosting the tower scene.
///
/// Contract notes:
///
/// - `step` fully advances the world before returning; `body_state`
///   afterwards reads post-step state, never mid-step state.
/// - Trigger volumes registered with `add_trigger` detect overlap but
///   apply no collision response, and emit one [`OverlapEvent`] per
///   crossing (on the transition into the volume).
/// - Removing an unknown body is a no-op; `body_state` for an unknown
///   body returns `None`.
pub trait RigidBodySim {
    /// Admit a body to the simulated world.
    fn add_body(&mut self, id: BodyId, state: BodyState);

    /// Remove a body from the simulated world.
    fn remove_body(&mut self, id: BodyId);

    /// Whether a body is currently registered.
    fn contains(&self, id: BodyId) -> bool;

    /// Read a body's post-step state.
    fn body_state(&self, id: BodyId) -> Option<&BodyState>;

    /// Overwrite a body's angular velocity (the release kick).
    fn set_angular_velocity(&mut self, id: BodyId, angular_velocity: Vec3);

    /// Clear a body's sleep flag so the next step moves it.
    fn wake(&mut self, id: BodyId);

    /// Advance the world by `real_dt` seconds in fixed `fixed_dt`
    /// substeps, at most `max_substeps` of them.
    fn step(&mut self, fixed_dt: f32, real_dt: f32, max_substeps: u32);

    /// Register a static trigger volume.
    fn add_trigger(&mut self, id: BodyId, volume: Aabb);

    /// Take all overlap events generated since the last drain.
    fn drain_overlap_events(&mut self) -> Vec<OverlapEvent>;
}
