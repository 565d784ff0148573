//! Face Map
//!
//! The fixed binding between a die's six local face normals and the
//! numerals printed on them. Follows standard die numbering: opposite
//! faces sum to 7.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;

/// One face of the die: a local unit normal and its printed value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceBinding {
    /// Outward face normal in the die's local frame
    pub axis: Vec3,
    /// Printed value, 1..=6
    pub value: u8,
}

/// The six face bindings, in the fixed order ties are broken by.
///
/// Must stay a bijection: six distinct ± axes, each value 1-6 used
/// exactly once.
pub const FACE_BINDINGS: [FaceBinding; 6] = [
    FaceBinding { axis: Vec3::new(1.0, 0.0, 0.0), value: 1 },
    FaceBinding { axis: Vec3::new(-1.0, 0.0, 0.0), value: 6 },
    FaceBinding { axis: Vec3::new(0.0, 1.0, 0.0), value: 2 },
    FaceBinding { axis: Vec3::new(0.0, -1.0, 0.0), value: 5 },
    FaceBinding { axis: Vec3::new(0.0, 0.0, 1.0), value: 3 },
    FaceBinding { axis: Vec3::new(0.0, 0.0, -1.0), value: 4 },
];

/// Look up the binding whose local axis matches `axis` exactly.
///
/// Intended for tests and tooling; the resolver iterates the table
/// directly.
pub fn binding_for_axis(axis: Vec3) -> Option<&'static FaceBinding> {
    FACE_BINDINGS.iter().find(|binding| binding.axis == axis)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_map_is_bijection() {
        // Each value 1..=6 used exactly once
        let mut seen_values = [false; 6];
        for binding in &FACE_BINDINGS {
            assert!((1..=6).contains(&binding.value));
            let slot = &mut seen_values[(binding.value - 1) as usize];
            assert!(!*slot, "value {} bound twice", binding.value);
            *slot = true;
        }
        assert!(seen_values.iter().all(|&seen| seen));

        // Six distinct unit axes
        for (i, a) in FACE_BINDINGS.iter().enumerate() {
            assert!((a.axis.length_squared() - 1.0).abs() < 1e-6);
            for b in &FACE_BINDINGS[i + 1..] {
                assert_ne!(a.axis, b.axis, "duplicate axis");
            }
        }
    }

    #[test]
    fn test_opposite_faces_sum_to_seven() {
        for binding in &FACE_BINDINGS {
            let opposite = binding_for_axis(-binding.axis).expect("opposite axis bound");
            assert_eq!(binding.value + opposite.value, 7);
        }
    }

    #[test]
    fn test_reference_numbering() {
        assert_eq!(binding_for_axis(Vec3::Y).unwrap().value, 2);
        assert_eq!(binding_for_axis(-Vec3::Y).unwrap().value, 5);
        assert_eq!(binding_for_axis(Vec3::X).unwrap().value, 1);
        assert_eq!(binding_for_axis(Vec3::Z).unwrap().value, 3);
    }
}
