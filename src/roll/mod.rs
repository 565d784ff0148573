//! Outcome-Resolution Engine
//!
//! Everything between "a die is falling" and "the roll is a 4":
//!
//! - `face`: local face normals bound to printed values
//! - `settle`: is the body stable enough to read?
//! - `resolve`: orientation to face value, with deferral
//! - `trigger`: exit-volume crossing detection
//! - `die`: per-roll record and lifecycle phases
//! - `schedule`: deferred resolution task queue
//! - `events`: the outward result stream
//! - `tower`: the lifecycle controller tying it together

pub mod die;
pub mod events;
pub mod face;
pub mod resolve;
pub mod schedule;
pub mod settle;
pub mod tower;
pub mod trigger;

// Re-export key types
pub use die::{Die, DieId, DiePhase};
pub use events::{RollEvent, RollEventData};
pub use face::{FaceBinding, FACE_BINDINGS};
pub use resolve::{read_up_face, try_resolve, Attempt, ResolveError};
pub use settle::{classify, Settle, SettleThresholds};
pub use tower::{DiceTower, TickResult, TowerConfig};
pub use trigger::ExitTrigger;
