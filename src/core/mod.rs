//! Core Primitives
//!
//! Pure math used by the resolution engine:
//!
//! - `vec3`: f32 3D vector operations
//! - `quat`: unit quaternion orientation, local-to-world rotation
//! - `rng`: Xorshift128+ PRNG and roll seed derivation

pub mod quat;
pub mod rng;
pub mod vec3;

pub use quat::Quat;
pub use rng::RollRng;
pub use vec3::Vec3;
