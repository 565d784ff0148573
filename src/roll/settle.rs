//! Settle Detection
//!
//! Classifies a body as settled enough for its face-up reading to be
//! treated as final. The engine sleep flag alone is slow to trip right
//! after a trigger crossing, so an explicit velocity check runs beside
//! it; either signal settles the body.

use serde::{Deserialize, Serialize};

use crate::sim::body::BodyState;

/// Squared-velocity thresholds below which a body counts as settled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettleThresholds {
    /// Max squared linear velocity
    pub linear_sq: f32,
    /// Max squared angular velocity
    pub angular_sq: f32,
}

impl Default for SettleThresholds {
    fn default() -> Self {
        Self {
            linear_sq: 0.2,
            angular_sq: 0.2,
        }
    }
}

/// Settle classification. Pure, no errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settle {
    /// Stable enough to read a face value
    Settled,
    /// Still in motion; resolution must defer
    Moving,
}

/// Classify a body against the thresholds.
///
/// Settled if the engine reports it asleep, or if both squared
/// velocities are at or below their thresholds.
pub fn classify(state: &BodyState, thresholds: &SettleThresholds) -> Settle {
    if state.asleep {
        return Settle::Settled;
    }

    let linear_ok = state.linear_velocity.length_squared() <= thresholds.linear_sq;
    let angular_ok = state.angular_velocity.length_squared() <= thresholds.angular_sq;

    if linear_ok && angular_ok {
        Settle::Settled
    } else {
        Settle::Moving
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quat::Quat;
    use crate::core::vec3::Vec3;

    fn body_with(linear: Vec3, angular: Vec3, asleep: bool) -> BodyState {
        BodyState {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            linear_velocity: linear,
            angular_velocity: angular,
            asleep,
        }
    }

    #[test]
    fn test_asleep_body_is_settled() {
        // Sleep flag wins even with stale velocity readings
        let state = body_with(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, true);
        assert_eq!(classify(&state, &SettleThresholds::default()), Settle::Settled);
    }

    #[test]
    fn test_slow_body_is_settled() {
        let state = body_with(
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.0, 0.1, 0.0),
            false,
        );
        assert_eq!(classify(&state, &SettleThresholds::default()), Settle::Settled);
    }

    #[test]
    fn test_fast_linear_is_moving() {
        let state = body_with(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, false);
        assert_eq!(classify(&state, &SettleThresholds::default()), Settle::Moving);
    }

    #[test]
    fn test_fast_angular_is_moving() {
        // Linear below threshold is not enough on its own
        let state = body_with(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), false);
        assert_eq!(classify(&state, &SettleThresholds::default()), Settle::Moving);
    }

    #[test]
    fn test_threshold_boundary_is_settled() {
        // Squared magnitude exactly at the threshold counts as settled
        let thresholds = SettleThresholds {
            linear_sq: 0.25,
            angular_sq: 0.25,
        };
        let state = body_with(Vec3::new(0.5, 0.0, 0.0), Vec3::ZERO, false);
        assert_eq!(classify(&state, &thresholds), Settle::Settled);
    }
}
