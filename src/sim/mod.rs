//! External Collaborator Contracts
//!
//! The resolution engine treats physics and rendering as opaque
//! capabilities behind narrow traits:
//!
//! - `body`: rigid-body snapshot types shared across the boundary
//! - `simulator`: the `RigidBodySim` trait the tower steps and reads
//! - `scene`: the `SceneGraph` trait visual twins live in
//! - `kinematic`: a minimal built-in simulator for demos and tests

pub mod body;
pub mod kinematic;
pub mod scene;
pub mod simulator;

pub use body::{Aabb, BodyId, BodyState, OverlapEvent};
pub use kinematic::{KinematicConfig, KinematicSim};
pub use scene::{NodeId, RecordingScene, SceneGraph};
pub use simulator::RigidBodySim;
