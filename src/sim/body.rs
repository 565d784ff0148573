//! Rigid Body State
//!
//! The read surface the resolution engine needs from a simulated body,
//! plus the identifiers and geometry shared with the simulator contract.

use serde::{Deserialize, Serialize};

use crate::core::quat::Quat;
use crate::core::vec3::Vec3;

/// Opaque handle to a simulated rigid body.
///
/// Allocated by the tower controller, monotonic. Implements Ord for
/// deterministic BTreeMap ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Snapshot of a rigid body as reported by the simulator after a step.
///
/// The resolution engine only ever reads this; all mutation happens
/// inside the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    /// World position
    pub position: Vec3,

    /// World orientation (unit quaternion)
    pub orientation: Quat,

    /// Linear velocity (units per second)
    pub linear_velocity: Vec3,

    /// Angular velocity (radians per second, axis-scaled)
    pub angular_velocity: Vec3,

    /// Engine-reported sleep flag
    pub asleep: bool,
}

impl BodyState {
    /// A body at rest at `position` with the given orientation.
    pub fn at_rest(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            asleep: false,
        }
    }
}

impl Default for BodyState {
    fn default() -> Self {
        Self::at_rest(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Axis-aligned box, used for trigger volumes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create from corners. Caller must keep min <= max per component.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create from a center point and half-extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Check whether a point lies inside (inclusive).
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

/// A body entered a trigger volume this step.
///
/// Trigger volumes detect overlap without applying any collision
/// response; one event is emitted per crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapEvent {
    /// The trigger volume's body
    pub trigger: BodyId,
    /// The body that entered it
    pub body: BodyId,
}

// =============================================================================
// TESTS
// =============================================================================
