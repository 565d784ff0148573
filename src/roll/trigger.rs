//! Exit Trigger
//!
//! The detection volume just past the tower's mouth. The simulator
//! reports crossings as overlap events; this type is the pure scan
//! that picks out entries into *this* trigger. Re-entry guarding is
//! the controller's job (it checks the die's phase), so a body that
//! tumbles back through the volume is ignored after its first entry
//! has scheduled a resolution.

use serde::{Deserialize, Serialize};

use crate::sim::body::{Aabb, BodyId, OverlapEvent};

/// The exit detection volume and its simulator-side body.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ExitTrigger {
    /// Simulator body id of the registered trigger volume
    pub body: BodyId,
    /// The volume itself, kept for inspection/debugging
    pub volume: Aabb,
}

impl ExitTrigger {
    /// Create a trigger descriptor. The caller registers `volume`
    /// under `body` with the simulator.
    pub const fn new(body: BodyId, volume: Aabb) -> Self {
        Self { body, volume }
    }

    /// Scan a frame's overlap events for bodies entering this trigger.
    pub fn poll<'a>(
        &'a self,
        events: &'a [OverlapEvent],
    ) -> impl Iterator<Item = BodyId> + 'a {
        events
            .iter()
            .filter(move |event| event.trigger == self.body)
            .map(|event| event.body)
    }
}

// =============================================================================
// TESTS
// =============================================================================
