/*!
 * Scheduler Events
 * Typed notifications between the tick source, workers and the scheduler
 */

use super::Scheduler;
use crate::core::types::{Pid, Tick};
use crate::process::types::ProcessState;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Inbound notification for the scheduler core
///
/// Worker notifications always carry the sender's pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "pid", rename_all = "snake_case")]
pub enum SchedulerEvent {
    /// One logical tick elapsed
    Tick,
    /// The worker is blocking on I/O
    IoRequest(Pid),
    /// The worker terminated
    Completed(Pid),
}

/// "Consume one unit of work now", scheduler -> worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunNotice {
    pub pid: Pid,
    /// Tick that charged this unit
    pub tick: Tick,
    /// Sleeping -> Ready transitions of the process so far; lets a worker
    /// waiting on I/O tell stale notices from post-wake ones
    pub wakeups: u32,
}

impl Scheduler {
    /// Apply one event; ticks may yield a run notification to deliver
    pub fn apply(&mut self, event: SchedulerEvent) -> Option<RunNotice> {
        match event {
            SchedulerEvent::Tick => self.on_tick(),
            SchedulerEvent::IoRequest(pid) => {
                self.on_io_request(pid);
                None
            }
            SchedulerEvent::Completed(pid) => {
                self.on_completed(pid);
                None
            }
        }
    }

    /// Mark `pid` Done, exactly once
    ///
    /// Returns false for unknown pids and for duplicate or late notifications.
    pub fn on_completed(&mut self, pid: Pid) -> bool {
        let Some(slot) = self.table.slot_of(pid) else {
            warn!(pid, "Completion for unknown process ignored");
            self.stats.ignored_events += 1;
            return false;
        };

        let tick = self.ticks;
        let Some(record) = self.table.get_mut(slot) else {
            return false;
        };
        if record.is_done() {
            debug!(pid, tick, "Duplicate completion ignored");
            self.stats.ignored_events += 1;
            return false;
        }

        record.state = ProcessState::Done;
        record.quantum_remaining = 0;
        record.io_remaining = 0;
        record.end_tick = Some(tick);
        let turnaround = tick - record.start_tick;

        self.io_pending[slot] = false;
        if self.current == Some(slot) {
            self.current = None;
        }
        self.stats.completions += 1;

        info!(pid, tick, turnaround, "Process done");
        self.debug_check_single_running();
        true
    }

    /// Record an I/O request from `pid`
    ///
    /// A Running requester is latched and put to sleep by the next tick. A
    /// Ready requester lost the CPU in the very tick whose notice it answered,
    /// so it sleeps immediately. Sleeping and Done requesters are ignored.
    pub fn on_io_request(&mut self, pid: Pid) -> bool {
        let Some(slot) = self.table.slot_of(pid) else {
            warn!(pid, "I/O request from unknown process ignored");
            self.stats.ignored_events += 1;
            return false;
        };
        let tick = self.ticks;
        let Some(record) = self.table.get_mut(slot) else {
            return false;
        };

        match record.state {
            ProcessState::Running => {
                self.io_pending[slot] = true;
                debug!(pid, tick, "I/O request latched");
                true
            }
            ProcessState::Ready => {
                record.state = ProcessState::Sleeping;
                record.io_remaining = self.random.io_duration(&self.io_range);
                self.stats.io_blocks += 1;
                debug!(
                    pid,
                    tick,
                    io_ticks = record.io_remaining,
                    "Process blocked on I/O after preemption"
                );
                true
            }
            ProcessState::Sleeping | ProcessState::Done => {
                debug!(pid, tick, state = %record.state, "Stale I/O request ignored");
                self.stats.ignored_events += 1;
                false
            }
        }
    }
}
