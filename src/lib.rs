//! # Dice Tower
//!
//! Outcome-resolution engine for a physics-driven dice tower: one die
//! at a time falls through the tower, and once it settles the face
//! pointing up is read off and reported exactly once.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        DICE TOWER                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Pure math primitives                      │
//! │  ├── vec3.rs     - f32 3D vector                             │
//! │  ├── quat.rs     - orientation quaternion, local-to-world    │
//! │  └── rng.rs      - Xorshift128+ PRNG, roll seed derivation   │
//! │                                                              │
//! │  roll/           - Outcome resolution (the core)             │
//! │  ├── face.rs     - face normal to value bindings             │
//! │  ├── settle.rs   - SETTLED/MOVING classification             │
//! │  ├── resolve.rs  - orientation to face value                 │
//! │  ├── trigger.rs  - exit-volume crossing detection            │
//! │  ├── die.rs      - per-roll record and lifecycle phases      │
//! │  ├── schedule.rs - deferred resolution task queue            │
//! │  ├── events.rs   - result stream                             │
//! │  └── tower.rs    - lifecycle controller and tick pipeline    │
//! │                                                              │
//! │  sim/            - External collaborators (opaque)           │
//! │  ├── simulator.rs- rigid-body simulator contract             │
//! │  ├── scene.rs    - scene graph contract                      │
//! │  └── kinematic.rs- built-in stand-in world for demos/tests   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Resolution guarantees
//!
//! - A result is reported **at most once** per die: the exit trigger
//!   only arms on an in-flight die, and every deferred task re-checks
//!   the die's registration and resolved flag before acting.
//! - Resolution only reads post-step simulator state, never mid-step.
//! - No resolution-pipeline fault aborts the tick loop; a faulted roll
//!   simply never reports and the tower stays interactive.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod roll;
pub mod sim;

// Re-export commonly used types
pub use self::core::quat::Quat;
pub use self::core::rng::RollRng;
pub use self::core::vec3::Vec3;
pub use roll::{DiceTower, DieId, RollEvent, RollEventData, TickResult, TowerConfig};
pub use sim::{BodyId, BodyState, KinematicSim, RecordingScene, RigidBodySim, SceneGraph};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Animation tick rate (Hz)
pub const TICK_RATE: u32 = 60;

/// Fixed physics timestep passed to the simulator
pub const FIXED_DT: f32 = 1.0 / TICK_RATE as f32;

/// Max catch-up substeps per frame
pub const MAX_SUBSTEPS: u32 = 3;
