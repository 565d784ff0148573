//! Die Lifecycle Controller
//!
//! Owns one tower's simulation context end to end: the die registry,
//! the exit trigger, the deferred-task queue, and the per-tick
//! pipeline. Everything runs on the caller's single tick loop; the
//! "deferred" resolution attempts are just tasks due at a later tick.
//!
//! Duplicate resolution is impossible by construction: the trigger
//! handler only fires on an in-flight die, and a firing task
//! re-validates the die's registration and resolved flag before
//! touching it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::core::quat::Quat;
use crate::core::rng::{derive_roll_seed, RollRng};
use crate::core::vec3::Vec3;
use crate::sim::body::{Aabb, BodyId, BodyState};
use crate::sim::scene::{NodeId, SceneGraph};
use crate::sim::simulator::RigidBodySim;
use crate::{FIXED_DT, MAX_SUBSTEPS};

use super::die::{Die, DieId, DiePhase};
use super::events::RollEvent;
use super::resolve::{try_resolve, Attempt, ResolveError};
use super::schedule::{TaskKind, TaskQueue};
use super::settle::SettleThresholds;
use super::trigger::ExitTrigger;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<RollEvent>,
    /// Outcome reported this tick, if any
    pub resolved: Option<(DieId, u8)>,
}

/// Configuration for one tower.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TowerConfig {
    /// Settle detector thresholds
    pub thresholds: SettleThresholds,
    /// Ticks between exit detection and the first resolution attempt
    pub settle_delay_ticks: u32,
    /// Ticks between deferred resolution retries
    pub retry_interval_ticks: u32,
    /// Retry cap; past it the roll is abandoned with a warning
    pub max_resolve_attempts: u32,
    /// Magnitude of the per-axis angular kick applied on release
    pub release_kick: f32,
    /// Prepare dice at a random orientation (tests use identity)
    pub randomize_orientation: bool,
    /// Where a prepared die waits above the tower
    pub spawn_position: Vec3,
    /// Exit detection volume, just past the tower's mouth
    pub exit_volume: Aabb,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            thresholds: SettleThresholds::default(),
            settle_delay_ticks: 60,   // 1 second at 60 Hz
            retry_interval_ticks: 18, // ~300 ms
            max_resolve_attempts: 600,
            release_kick: 3.0,
            randomize_orientation: true,
            spawn_position: Vec3::new(0.0, 10.0, 0.0),
            exit_volume: Aabb::from_center(Vec3::new(0.0, 1.5, 0.0), Vec3::new(2.5, 1.0, 2.5)),
        }
    }
}

/// Lifecycle controller for a single tower.
///
/// Generic over the simulator and scene graph so tests drive it with
/// the built-in stand-ins and embeddings plug in real engines.
#[derive(Debug)]
pub struct DiceTower<S: RigidBodySim, G: SceneGraph> {
    config: TowerConfig,
    sim: S,
    scene: G,
    rng: RollRng,

    /// Tower identity, mixed into per-roll seeds
    tower_id: [u8; 16],

    /// Current tick
    tick: u32,

    /// Rolls started so far, for seed derivation
    roll_index: u32,

    /// All dice this tower has produced since the last reset
    dice: BTreeMap<DieId, Die>,

    /// The exit detection volume
    trigger: ExitTrigger,

    /// Deferred resolution work
    tasks: TaskQueue,

    /// Events generated this tick (cleared each tick)
    pending_events: Vec<RollEvent>,

    next_die_id: u32,
    next_body_id: u32,
    next_node_id: u32,
}

impl<S: RigidBodySim, G: SceneGraph> DiceTower<S, G> {
    /// Create a tower and register its exit trigger with the simulator.
    pub fn new(mut sim: S, scene: G, config: TowerConfig, tower_id: [u8; 16]) -> Self {
        let trigger_body = BodyId(0);
        sim.add_trigger(trigger_body, config.exit_volume);

        Self {
            rng: RollRng::new(derive_roll_seed(&tower_id, 0)),
            config,
            sim,
            scene,
            tower_id,
            tick: 0,
            roll_index: 0,
            dice: BTreeMap::new(),
            trigger: ExitTrigger::new(trigger_body, config.exit_volume),
            tasks: TaskQueue::new(),
            pending_events: Vec::new(),
            next_die_id: 0,
            next_body_id: 1, // 0 is the trigger
            next_node_id: 0,
        }
    }

    /// Create a die staged at the spawn point, excluded from simulation.
    ///
    /// Returns the existing die's id if one is already in play; the
    /// tower holds at most one unresolved die at a time.
    pub fn prepare_die(&mut self) -> DieId {
        if let Some(active) = self.dice.values().find(|die| die.is_active()) {
            debug!(die = active.id.0, "prepare ignored, die already in play");
            return active.id;
        }

        let id = DieId(self.next_die_id);
        self.next_die_id += 1;
        let node = NodeId(self.next_node_id);
        self.next_node_id += 1;
        let body = BodyId(self.next_body_id);
        self.next_body_id += 1;

        // Fresh per-roll randomness, reproducible for a given tower
        self.rng = RollRng::new(derive_roll_seed(&self.tower_id, self.roll_index));
        self.roll_index += 1;

        let orientation = if self.config.randomize_orientation {
            let (x, y, z) = self.rng.random_euler_angles();
            Quat::from_euler(x, y, z)
        } else {
            Quat::IDENTITY
        };

        let staged = BodyState::at_rest(self.config.spawn_position, orientation);
        self.scene.add_node(node);
        self.scene.set_transform(node, staged.position, staged.orientation);

        self.dice.insert(id, Die::prepared(id, node, body, staged));
        self.pending_events.push(RollEvent::die_prepared(self.tick, id));
        info!(die = id.0, "die prepared at {}", staged.position);

        id
    }

    /// External release signal: drop the waiting die into the tower.
    ///
    /// No-op if no die is currently prepared.
    pub fn release(&mut self) {
        let Some(die) = self
            .dice
            .values_mut()
            .find(|die| die.phase == DiePhase::Prepared)
        else {
            debug!("release ignored, no die waiting");
            return;
        };

        let Some(staged) = die.staged.take() else {
            // Prepared dice always carry a staged state
            error!(die = die.id.0, "prepared die has no staged body state");
            return;
        };

        let id = die.id;
        let body = die.body;
        die.phase = DiePhase::Released;

        self.sim.add_body(body, staged);
        let kick = self.rng.random_angular_kick(self.config.release_kick);
        self.sim.set_angular_velocity(body, kick);
        self.sim.wake(body);

        self.pending_events.push(RollEvent::die_released(self.tick, id));
        info!(die = id.0, "die released with kick {}", kick);
    }

    /// Run one cooperative frame.
    ///
    /// # Ordering
    ///
    /// Physics is fully advanced before visuals are synchronized and
    /// before any resolution task is evaluated, so resolution always
    /// reads post-step state.
    pub fn tick(&mut self, real_dt: f32) -> TickResult {
        // 0. Advance tick counter
        self.tick += 1;

        // 1. Step physics
        self.sim.step(FIXED_DT, real_dt, MAX_SUBSTEPS);

        // 2. Sync visual twins from post-step state; promote freshly
        //    released dice now that the simulator owns their motion
        for die in self.dice.values_mut() {
            if let Some(state) = self.sim.body_state(die.body) {
                self.scene.set_transform(die.node, state.position, state.orientation);
                if die.phase == DiePhase::Released {
                    die.phase = DiePhase::InFlight;
                }
            }
        }

        // 3. Poll the exit trigger
        let overlaps = self.sim.drain_overlap_events();
        let entered: Vec<BodyId> = self.trigger.poll(&overlaps).collect();
        for body in entered {
            self.on_trigger_entry(body);
        }

        // 4. Run due deferred work
        let due = self.tasks.drain_due(self.tick);
        for task in due {
            match task.kind {
                TaskKind::AttemptResolution => self.attempt_resolution(task.die),
            }
        }

        // 5. Collect events
        let events = std::mem::take(&mut self.pending_events);
        let resolved = events.iter().find_map(|event| match event.data {
            super::events::RollEventData::DieResolved { value } => {
                event.die.map(|die| (die, value))
            }
            _ => None,
        });

        TickResult { events, resolved }
    }

    /// Remove every die (whatever its phase) from simulation and
    /// rendering. No resolution is attempted for them afterward.
    pub fn reset(&mut self) {
        for die in self.dice.values() {
            self.sim.remove_body(die.body);
            self.scene.remove_node(die.node);
        }
        let removed = self.dice.len();
        self.dice.clear();
        self.tasks.clear();

        self.pending_events.push(RollEvent::scene_reset(self.tick));
        info!(removed, "scene reset");
    }

    /// Handle a body entering the exit trigger.
    ///
    /// Only the first entry of an in-flight die schedules resolution;
    /// re-entries and foreign bodies are ignored.
    fn on_trigger_entry(&mut self, body: BodyId) {
        let Some(die) = self.dice.values_mut().find(|die| die.body == body) else {
            debug!(body = body.0, "trigger entry from unknown body ignored");
            return;
        };

        if die.phase != DiePhase::InFlight {
            debug!(die = die.id.0, phase = ?die.phase, "trigger re-entry ignored");
            return;
        }

        die.phase = DiePhase::ExitDetected;
        let due = self.tick + self.config.settle_delay_ticks;
        self.tasks.schedule(due, die.id, TaskKind::AttemptResolution);
        self.pending_events.push(RollEvent::exit_detected(self.tick, die.id));
        debug!(die = die.id.0, due, "exit detected, resolution scheduled");
    }

    /// Run one resolution attempt for a die.
    ///
    /// Stale tasks (die unregistered after a reset, or already
    /// resolved) are silent no-ops.
    fn attempt_resolution(&mut self, die_id: DieId) {
        let Some(die) = self.dice.get_mut(&die_id) else {
            debug!(die = die_id.0, "resolution task for unregistered die dropped");
            return;
        };

        if die.resolved || die.abandoned {
            debug!(die = die_id.0, "resolution task for finished die dropped");
            return;
        }

        let Some(state) = self.sim.body_state(die.body) else {
            debug!(die = die_id.0, "resolution task for removed body dropped");
            return;
        };
        let state = *state;

        die.resolve_attempts += 1;

        match try_resolve(&state, &self.config.thresholds) {
            Ok(Attempt::Resolved(value)) => {
                die.mark_resolved(value);
                self.pending_events
                    .push(RollEvent::die_resolved(self.tick, die_id, value));
                info!(die = die_id.0, value, "die resolved");
            }
            Ok(Attempt::Deferred) => {
                if die.resolve_attempts >= self.config.max_resolve_attempts {
                    die.abandoned = true;
                    let attempts = die.resolve_attempts;
                    self.pending_events
                        .push(RollEvent::roll_abandoned(self.tick, die_id, attempts));
                    warn!(die = die_id.0, attempts, "die never settled, roll abandoned");
                } else {
                    let due = self.tick + self.config.retry_interval_ticks;
                    self.tasks.schedule(due, die_id, TaskKind::AttemptResolution);
                    debug!(die = die_id.0, due, "die still moving, resolution deferred");
                }
            }
            Err(ResolveError::OrientationIndeterminate) => {
                // Logic-fatal for this roll; the loop itself keeps running
                die.abandoned = true;
                let attempts = die.resolve_attempts;
                self.pending_events
                    .push(RollEvent::roll_abandoned(self.tick, die_id, attempts));
                error!(die = die_id.0, "orientation indeterminate, die left unresolved");
            }
        }
    }

    /// Current tick.
    pub fn current_tick(&self) -> u32 {
        self.tick
    }

    /// Look up a die.
    pub fn die(&self, id: DieId) -> Option<&Die> {
        self.dice.get(&id)
    }

    /// Final value of a die, if it has resolved.
    pub fn result_of(&self, id: DieId) -> Option<u8> {
        self.dice.get(&id).and_then(|die| die.result_value)
    }

    /// The simulator, for inspection.
    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// The scene graph, for inspection.
    pub fn scene(&self) -> &G {
        &self.scene
    }
}

// =============================================================================
// TESTS
// =============================================================================
