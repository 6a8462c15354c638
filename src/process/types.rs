/*!
 * Process Types
 * Scheduling state and per-process bookkeeping
 */

use crate::core::types::{Pid, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Waiting for the CPU
    Ready,
    /// Owns the (single) CPU
    Running,
    /// Blocked on I/O until `io_remaining` drains
    Sleeping,
    /// Terminated; kept for reporting only
    Done,
}

impl ProcessState {
    /// Upper-case label used by the console report
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Sleeping => "SLEEP",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process control record
///
/// Fields are readable by anyone holding the table, but only the scheduler
/// core mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub state: ProcessState,
    /// Ticks left before forced preemption while Running
    pub quantum_remaining: u32,
    /// Ticks left before returning to Ready; meaningful only while Sleeping
    pub io_remaining: u32,
    pub wait_ticks: u64,
    pub run_ticks: u64,
    /// Ticks that ended with the process still Sleeping
    pub sleep_ticks: u64,
    /// Number of Sleeping -> Ready transitions
    pub wakeups: u32,
    pub start_tick: Tick,
    pub end_tick: Option<Tick>,
}

impl ProcessRecord {
    /// New Ready record with a full quantum
    #[must_use]
    pub fn new(pid: Pid, quantum: u32, start_tick: Tick) -> Self {
        Self {
            pid,
            state: ProcessState::Ready,
            quantum_remaining: quantum,
            io_remaining: 0,
            wait_ticks: 0,
            run_ticks: 0,
            sleep_ticks: 0,
            wakeups: 0,
            start_tick,
            end_tick: None,
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, ProcessState::Ready)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_sleeping(&self) -> bool {
        matches!(self.state, ProcessState::Sleeping)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.state, ProcessState::Done)
    }

    /// Ticks between creation and termination, `None` while still alive
    #[inline]
    #[must_use]
    pub fn turnaround(&self) -> Option<Tick> {
        self.end_tick.map(|end| end - self.start_tick)
    }

    /// Ticks charged to a Ready, Running or Sleeping account
    #[inline]
    #[must_use]
    pub const fn accounted_ticks(&self) -> u64 {
        self.wait_ticks + self.run_ticks + self.sleep_ticks
    }
}
