//! Orientation Quaternion
//!
//! Unit quaternion for rigid-body orientation. The one operation the
//! resolution engine actually needs is `rotate`: map a local face axis
//! into world space under pure rotation (length-preserving, no
//! translation, no scale).

use std::fmt;
use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::vec3::Vec3;

/// Unit quaternion (x, y, z, w) representing a rotation.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    /// X (imaginary i) component
    pub x: f32,
    /// Y (imaginary j) component
    pub y: f32,
    /// Z (imaginary k) component
    pub z: f32,
    /// W (real) component
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// No rotation.
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create from raw components. Caller is responsible for normalization.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about a unit `axis`.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    /// Rotation from intrinsic XYZ Euler angles (radians).
    ///
    /// This is the convention used when a die is prepared at a random
    /// orientation.
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        let qx = Self::from_axis_angle(Vec3::X, x);
        let qy = Self::from_axis_angle(Vec3::Y, y);
        let qz = Self::from_axis_angle(Vec3::Z, z);
        qx * qy * qz
    }

    /// Squared norm.
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Normalize to unit length.
    /// Returns IDENTITY if the norm is zero.
    pub fn normalize(self) -> Self {
        let len = self.length_squared().sqrt();
        if len == 0.0 {
            return Self::IDENTITY;
        }
        let inv = 1.0 / len;
        Self {
            x: self.x * inv,
            y: self.y * inv,
            z: self.z * inv,
            w: self.w * inv,
        }
    }

    /// Conjugate (inverse rotation for a unit quaternion).
    #[inline]
    pub fn conjugate(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Hamilton product: the rotation `self` followed-by-applying `other`
    /// in the usual `q_outer * q_inner` composition order.
    pub fn mul(self, other: Self) -> Self {
        Self {
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        }
    }

    /// Rotate a local-space vector into world space (`q v q*`).
    ///
    /// Uses the expanded form `v + 2w(u × v) + 2(u × (u × v))` which
    /// avoids building intermediate quaternions.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let uv = u.cross(v);
        let uuv = u.cross(uv);
        v + uv.scale(2.0 * self.w) + uuv.scale(2.0)
    }

    /// Check that all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Mul for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul(rhs)
    }
}

impl fmt::Debug for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quat({:.3}, {:.3}, {:.3}, {:.3})",
            self.x, self.y, self.z, self.w
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(
            (a - b).length_squared() < EPSILON,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_identity_preserves_axes() {
        assert_vec_eq(Quat::IDENTITY.rotate(Vec3::X), Vec3::X);
        assert_vec_eq(Quat::IDENTITY.rotate(Vec3::Y), Vec3::Y);
        assert_vec_eq(Quat::IDENTITY.rotate(Vec3::Z), Vec3::Z);
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let q = Quat::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2);
        assert_vec_eq(q.rotate(Vec3::X), Vec3::Y);
        assert_vec_eq(q.rotate(Vec3::Y), -Vec3::X);
        // Rotation axis is unchanged
        assert_vec_eq(q.rotate(Vec3::Z), Vec3::Z);
    }

    #[test]
    fn test_half_turn_about_x_flips_y() {
        let q = Quat::from_axis_angle(Vec3::X, std::f32::consts::PI);
        assert_vec_eq(q.rotate(Vec3::Y), -Vec3::Y);
        assert_vec_eq(q.rotate(Vec3::Z), -Vec3::Z);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let q = Quat::from_euler(0.7, -1.3, 2.1);
        let v = Vec3::new(3.0, -4.0, 12.0);
        let rotated = q.rotate(v);
        assert!((rotated.length() - v.length()).abs() < 1e-4);
    }

    #[test]
    fn test_conjugate_inverts_rotation() {
        let q = Quat::from_euler(0.4, 1.1, -0.9);
        let v = Vec3::new(1.0, 2.0, 3.0);
        let round_trip = q.conjugate().rotate(q.rotate(v));
        assert_vec_eq(round_trip, v);
    }

    #[test]
    fn test_normalize() {
        let q = Quat::new(2.0, 0.0, 0.0, 0.0).normalize();
        assert!((q.length_squared() - 1.0).abs() < EPSILON);

        // Degenerate input falls back to identity
        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).normalize(), Quat::IDENTITY);
    }

    #[test]
    fn test_from_euler_single_axis_matches_axis_angle() {
        let a = Quat::from_euler(0.0, 0.8, 0.0);
        let b = Quat::from_axis_angle(Vec3::Y, 0.8);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_eq(a.rotate(v), b.rotate(v));
    }
}
