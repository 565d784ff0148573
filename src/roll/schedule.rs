//! Deferred Task Queue
//!
//! Post-trigger settle delays and resolution retries are scheduled as
//! tasks due at a future tick, drained once per tick by the controller.
//! Tasks capture nothing but a die id: when one fires it is re-validated
//! against the live registry, so scene reset needs no timer cancellation
//! (a stale task is a silent no-op).

use serde::{Deserialize, Serialize};

use super::die::DieId;

/// What a scheduled task does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Run one resolution attempt for the die
    AttemptResolution,
}

/// A task due at a future tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Tick at which the task becomes due
    pub due_tick: u32,
    /// Owning die
    pub die: DieId,
    /// Action to run
    pub kind: TaskKind,
}

/// FIFO-stable queue of scheduled tasks.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskQueue {
    tasks: Vec<ScheduledTask>,
}

impl TaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task.
    pub fn schedule(&mut self, due_tick: u32, die: DieId, kind: TaskKind) {
        self.tasks.push(ScheduledTask { due_tick, die, kind });
    }

    /// Remove and return every task due at or before `tick`,
    /// preserving scheduling order.
    pub fn drain_due(&mut self, tick: u32) -> Vec<ScheduledTask> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due_tick <= tick {
                due.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }
        due
    }

    /// Drop every pending task (scene reset).
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
