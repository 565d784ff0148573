//! Die State
//!
//! One record per roll: the visual/physical twin handles and the
//! lifecycle phase. A die's result is written at most once; once
//! `resolved` is set the value never changes.

use serde::{Deserialize, Serialize};

use crate::sim::body::{BodyId, BodyState};
use crate::sim::scene::NodeId;

/// Unique die identifier (monotonic per tower).
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct DieId(pub u32);

/// Lifecycle phase of a die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiePhase {
    /// Twin exists; body excluded from simulation, waiting for release
    Prepared,
    /// Body admitted to the simulator with its release kick
    Released,
    /// Simulator owns its motion
    InFlight,
    /// Exit trigger fired; resolution attempt pending
    ExitDetected,
    /// Terminal; value reported exactly once
    Resolved,
}

/// State of a single die.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Die {
    /// Unique die ID
    pub id: DieId,

    /// Visual twin in the scene graph
    pub node: NodeId,

    /// Physical twin in the simulator (once released)
    pub body: BodyId,

    /// Current lifecycle phase
    pub phase: DiePhase,

    /// Body state while excluded from simulation (Prepared only)
    pub staged: Option<BodyState>,

    /// Result already reported - becomes true at most once
    pub resolved: bool,

    /// Final face value, set iff resolved
    pub result_value: Option<u8>,

    /// Resolution attempts consumed so far (bounded retry)
    pub resolve_attempts: u32,

    /// Resolution permanently given up (retry cap or internal fault)
    pub abandoned: bool,
}

impl Die {
    /// Create a prepared die staged at `staged`.
    pub fn prepared(id: DieId, node: NodeId, body: BodyId, staged: BodyState) -> Self {
        Self {
            id,
            node,
            body,
            phase: DiePhase::Prepared,
            staged: Some(staged),
            resolved: false,
            result_value: None,
            resolve_attempts: 0,
            abandoned: false,
        }
    }

    /// Whether this die still occupies the single active-roll slot.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, DiePhase::Resolved)
    }

    /// Record the final value. Panics in debug builds if called twice;
    /// the controller's phase checks make that unreachable.
    pub fn mark_resolved(&mut self, value: u8) {
        debug_assert!(!self.resolved, "die resolved twice");
        self.resolved = true;
        self.result_value = Some(value);
        self.phase = DiePhase::Resolved;
    }
}

// =============================================================================
// TESTS
// =============================================================================
