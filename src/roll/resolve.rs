//! Outcome Resolution
//!
//! Maps a settled body's orientation to the face value pointing up:
//! rotate each bound face normal into world space, dot it with world
//! up, and take the maximum. Invoked on a still-moving body it defers
//! instead of computing a likely-wrong answer; the caller reschedules.

use thiserror::Error;

use crate::core::quat::Quat;
use crate::core::vec3::Vec3;
use crate::sim::body::BodyState;

use super::face::FACE_BINDINGS;
use super::settle::{classify, Settle, SettleThresholds};

/// Resolution failures. Contained in the resolution pipeline; never
/// aborts the tick loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No face axis produced a finite up alignment. Unreachable with
    /// valid unit-vector geometry; treated as logic-fatal for the roll.
    #[error("no face axis produced a finite up alignment")]
    OrientationIndeterminate,
}

/// Outcome of a single resolution attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attempt {
    /// The body was settled; this is its face value.
    Resolved(u8),
    /// The body is still moving; retry after a short delay.
    Deferred,
}

/// Read the face value pointing up for a given orientation.
///
/// Ties (degenerate frame-perfect alignment) resolve to the first
/// binding in table order: the comparison is strictly greater-than.
pub fn read_up_face(orientation: Quat) -> Result<u8, ResolveError> {
    let mut best: Option<(u8, f32)> = None;

    for binding in &FACE_BINDINGS {
        let world_axis = orientation.rotate(binding.axis);
        let dot = world_axis.dot(Vec3::UP);

        if !dot.is_finite() {
            continue;
        }

        match best {
            Some((_, best_dot)) if dot <= best_dot => {}
            _ => best = Some((binding.value, dot)),
        }
    }

    best.map(|(value, _)| value)
        .ok_or(ResolveError::OrientationIndeterminate)
}

/// Attempt to resolve a body's outcome.
///
/// Consults the settle detector first: a moving body defers rather
/// than producing a value. The resolver is stateless; idempotency
/// (resolve-once) is the caller's responsibility.
pub fn try_resolve(
    state: &BodyState,
    thresholds: &SettleThresholds,
) -> Result<Attempt, ResolveError> {
    if classify(state, thresholds) == Settle::Moving {
        return Ok(Attempt::Deferred);
    }

    read_up_face(state.orientation).map(Attempt::Resolved)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quat::Quat;

    fn settled_with(orientation: Quat) -> BodyState {
        BodyState {
            position: Vec3::ZERO,
            orientation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            asleep: true,
        }
    }

    #[test]
    fn test_identity_reads_plus_y_binding() {
        // +Y is bound to 2 in the face map
        assert_eq!(read_up_face(Quat::IDENTITY), Ok(2));
    }

    #[test]
    fn test_half_turn_about_x_swaps_top_and_bottom() {
        let flipped = Quat::from_axis_angle(Vec3::X, std::f32::consts::PI);
        // -Y (bound to 5) is now pointing up
        assert_eq!(read_up_face(flipped), Ok(5));
    }

    #[test]
    fn test_quarter_turns_read_side_faces() {
        // 90° about Z maps local +X onto world up
        let q = Quat::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2);
        assert_eq!(read_up_face(q), Ok(1));

        // -90° about Z maps local -X onto world up
        let q = Quat::from_axis_angle(Vec3::Z, -std::f32::consts::FRAC_PI_2);
        assert_eq!(read_up_face(q), Ok(6));

        // 90° about X maps local -Z onto world up
        let q = Quat::from_axis_angle(Vec3::X, std::f32::consts::FRAC_PI_2);
        assert_eq!(read_up_face(q), Ok(4));
    }

    #[test]
    fn test_moving_body_defers() {
        let mut state = settled_with(Quat::IDENTITY);
        state.asleep = false;
        state.linear_velocity = Vec3::new(2.0, 0.0, 0.0);

        let attempt = try_resolve(&state, &SettleThresholds::default()).unwrap();
        assert_eq!(attempt, Attempt::Deferred);
    }

    #[test]
    fn test_settled_body_resolves() {
        let state = settled_with(Quat::IDENTITY);
        let attempt = try_resolve(&state, &SettleThresholds::default()).unwrap();
        assert_eq!(attempt, Attempt::Resolved(2));
    }

    #[test]
    fn test_deferred_then_resolved_as_velocity_drops() {
        let mut state = settled_with(Quat::IDENTITY);
        state.asleep = false;
        state.angular_velocity = Vec3::new(0.0, 3.0, 0.0);

        let thresholds = SettleThresholds::default();
        assert_eq!(try_resolve(&state, &thresholds).unwrap(), Attempt::Deferred);

        // Velocity drops below threshold on a later attempt
        state.angular_velocity = Vec3::new(0.0, 0.1, 0.0);
        assert_eq!(
            try_resolve(&state, &thresholds).unwrap(),
            Attempt::Resolved(2)
        );
    }

    #[test]
    fn test_indeterminate_orientation_is_an_error() {
        let bad = Quat::new(f32::NAN, 0.0, 0.0, f32::NAN);
        assert_eq!(read_up_face(bad), Err(ResolveError::OrientationIndeterminate));
    }

    #[test]
    fn test_tilted_orientation_still_picks_single_winner() {
        // A small tilt keeps +Y the clear winner
        let q = Quat::from_axis_angle(Vec3::X, 0.2);
        assert_eq!(read_up_face(q), Ok(2));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolves_to_valid_value_for_any_rotation(
                x in -std::f32::consts::PI..std::f32::consts::PI,
                y in -std::f32::consts::PI..std::f32::consts::PI,
                z in -std::f32::consts::PI..std::f32::consts::PI,
            ) {
                let q = Quat::from_euler(x, y, z);
                let value = read_up_face(q).unwrap();
                prop_assert!((1..=6).contains(&value));
            }

            #[test]
            fn opposite_tips_read_opposite_faces(
                angle in 0.8f32..2.35f32,
            ) {
                // Tipping past 45° about X in either direction lands on
                // the Z-axis pair, which sums to 7 like any opposite pair.
                let a = read_up_face(Quat::from_axis_angle(Vec3::X, angle)).unwrap();
                let b = read_up_face(Quat::from_axis_angle(Vec3::X, -angle)).unwrap();
                prop_assert_eq!(a + b, 7);
            }
        }
    }
}
