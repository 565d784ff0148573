//! Roll Events
//!
//! The result sink: everything the tower reports outward, one event
//! stream per tick. Rendering these into UI is out of scope.

use serde::{Deserialize, Serialize};

use super::die::DieId;

/// Roll event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollEventData {
    /// A die was created and staged at the tower mouth
    DiePrepared,

    /// The waiting die was admitted to the simulator
    DieReleased,

    /// The die crossed the exit trigger; resolution scheduled
    ExitDetected,

    /// Final outcome, reported exactly once per die
    DieResolved {
        /// Face value, 1..=6
        value: u8,
    },

    /// Resolution retries exhausted without the die settling
    RollAbandoned {
        /// Attempts consumed before giving up
        attempts: u32,
    },

    /// All dice removed; the tower is empty
    SceneReset,
}

/// A roll event with timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollEvent {
    /// Tick when the event occurred
    pub tick: u32,

    /// Die involved (None for scene-wide events)
    pub die: Option<DieId>,

    /// Event data
    pub data: RollEventData,
}

impl RollEvent {
    /// Create a new event.
    pub fn new(tick: u32, die: Option<DieId>, data: RollEventData) -> Self {
        Self { tick, die, data }
    }

    /// Create die prepared event.
    pub fn die_prepared(tick: u32, die: DieId) -> Self {
        Self::new(tick, Some(die), RollEventData::DiePrepared)
    }

    /// Create die released event.
    pub fn die_released(tick: u32, die: DieId) -> Self {
        Self::new(tick, Some(die), RollEventData::DieReleased)
    }

    /// Create exit detected event.
    pub fn exit_detected(tick: u32, die: DieId) -> Self {
        Self::new(tick, Some(die), RollEventData::ExitDetected)
    }

    /// Create die resolved event.
    pub fn die_resolved(tick: u32, die: DieId, value: u8) -> Self {
        Self::new(tick, Some(die), RollEventData::DieResolved { value })
    }

    /// Create roll abandoned event.
    pub fn roll_abandoned(tick: u32, die: DieId, attempts: u32) -> Self {
        Self::new(tick, Some(die), RollEventData::RollAbandoned { attempts })
    }

    /// Create scene reset event.
    pub fn scene_reset(tick: u32) -> Self {
        Self::new(tick, None, RollEventData::SceneReset)
    }
}
