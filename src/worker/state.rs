/*!
 * Worker Contract
 * Pure state machine of a simulated worker, shared by every driver
 */

use super::plan::{Finish, WorkPlan};
use crate::core::types::Pid;
use crate::process::scheduler::{RunNotice, SchedulerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Working,
    /// I/O requested while the process had `wakeups` wakeups
    AwaitingIo { wakeups: u32 },
    Exited,
}

/// One simulated worker
///
/// Reacts to run notices by consuming work and answers with at most one
/// notification. Notices after exit, and stale notices while waiting on I/O,
/// are ignored.
#[derive(Debug, Clone)]
pub struct WorkerState {
    pid: Pid,
    plan: WorkPlan,
    remaining: u32,
    consumed: u32,
    phase: Phase,
}

impl WorkerState {
    pub fn new(pid: Pid, plan: WorkPlan) -> Self {
        Self {
            pid,
            plan,
            remaining: plan.burst,
            consumed: 0,
            phase: Phase::Working,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn plan(&self) -> WorkPlan {
        self.plan
    }

    /// Units of work still to consume
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Units consumed so far
    #[inline]
    pub fn consumed(&self) -> u32 {
        self.consumed
    }

    #[inline]
    pub fn is_exited(&self) -> bool {
        self.phase == Phase::Exited
    }

    #[inline]
    pub fn is_awaiting_io(&self) -> bool {
        matches!(self.phase, Phase::AwaitingIo { .. })
    }

    /// Handle one run notice
    pub fn on_run(&mut self, notice: &RunNotice) -> Option<SchedulerEvent> {
        match self.phase {
            Phase::Exited => None,
            Phase::AwaitingIo { wakeups } if notice.wakeups <= wakeups => None,
            Phase::AwaitingIo { .. } => Some(self.exit()),
            Phase::Working => {
                if self.remaining == 0 {
                    return Some(self.exit());
                }
                self.remaining -= 1;
                self.consumed += 1;
                if self.remaining > 0 {
                    return None;
                }
                match self.plan.finish {
                    Finish::Exit => Some(self.exit()),
                    Finish::IoThenExit => {
                        self.phase = Phase::AwaitingIo {
                            wakeups: notice.wakeups,
                        };
                        Some(SchedulerEvent::IoRequest(self.pid))
                    }
                }
            }
        }
    }

    fn exit(&mut self) -> SchedulerEvent {
        self.phase = Phase::Exited;
        SchedulerEvent::Completed(self.pid)
    }
}
