/*!
 * Scheduler Statistics
 * Counters fed by the tick handler, selection policy and event handlers
 */

use super::Scheduler;
use serde::{Deserialize, Serialize};

/// Scheduler counters
///
/// Single-writer: only the scheduler core updates these, so plain integers suffice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub ticks: u64,
    /// Ready -> Running selections
    pub dispatches: u64,
    /// Dispatches that picked a different slot than the previous one
    pub context_switches: u64,
    /// Running -> Ready on quantum exhaustion
    pub preemptions: u64,
    /// Transitions into Sleeping
    pub io_blocks: u64,
    /// Sleeping -> Ready transitions
    pub wakeups: u64,
    /// Starvation-guard quantum refills
    pub refills: u64,
    pub completions: u64,
    /// Duplicate, late or unknown notifications that were dropped
    pub ignored_events: u64,
}

impl Scheduler {
    /// Snapshot of the scheduler counters
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}
