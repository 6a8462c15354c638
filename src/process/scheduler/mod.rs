/*!
 * CPU Scheduler
 * Single-CPU round-robin scheduler with quantum preemption and I/O blocking
 *
 * The scheduler is a pure state machine over the process table. Drivers feed
 * it typed events (ticks, I/O requests, completions) one at a time, which
 * serializes every mutation of a record's state.
 */

use super::table::ProcessTable;
use super::types::ProcessState;
use crate::core::types::{Pid, Slot, Tick};
use std::ops::RangeInclusive;

mod builder;
mod events;
mod policy;
mod random;
mod stats;
mod tick;

pub use builder::SchedulerBuilder;
pub use events::{RunNotice, SchedulerEvent};
pub use random::{FixedRandom, RandomSource, SeededRandom};
pub use stats::SchedulerStats;

/// CPU Scheduler
pub struct Scheduler {
    table: ProcessTable,

    // Slot currently owning the CPU
    current: Option<Slot>,

    // Reference for the next circular scan
    last_run: Option<Slot>,

    // I/O requests latched while the requester is Running, indexed by slot
    io_pending: Vec<bool>,

    ticks: Tick,
    quantum: u32,
    io_range: RangeInclusive<u32>,
    random: Box<dyn RandomSource>,
    stats: SchedulerStats,
}

impl Scheduler {
    /// Start building a scheduler for the given worker handles (slot order)
    pub fn builder(pids: Vec<Pid>) -> SchedulerBuilder {
        SchedulerBuilder::new(pids)
    }

    pub(crate) fn from_parts(
        pids: &[Pid],
        quantum: u32,
        io_range: RangeInclusive<u32>,
        random: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            table: ProcessTable::new(pids, quantum, 0),
            current: None,
            last_run: None,
            io_pending: vec![false; pids.len()],
            ticks: 0,
            quantum,
            io_range,
            random,
            stats: SchedulerStats::default(),
        }
    }

    /// Read-only view of the process records
    #[inline]
    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    /// Slot currently Running
    #[inline]
    pub fn current(&self) -> Option<Slot> {
        self.current
    }

    /// Pid currently Running
    pub fn current_pid(&self) -> Option<Pid> {
        self.current
            .and_then(|slot| self.table.get(slot))
            .map(|record| record.pid)
    }

    /// Logical ticks elapsed
    #[inline]
    pub fn ticks(&self) -> Tick {
        self.ticks
    }

    #[inline]
    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    /// True iff every process is Done
    #[inline]
    pub fn all_done(&self) -> bool {
        self.table.all_done()
    }

    /// Whether an I/O request is latched for `slot`
    pub fn io_pending(&self, slot: Slot) -> bool {
        self.io_pending.get(slot).copied().unwrap_or(false)
    }

    // Uniprocessor invariant: the current pointer and the Running count agree
    #[inline]
    fn debug_check_single_running(&self) {
        debug_assert!(
            self.table.count(ProcessState::Running) == usize::from(self.current.is_some()),
            "running count disagrees with current slot {:?}",
            self.current
        );
    }
}
