/*!
 * Worker Pool
 * Spawns one OS thread per simulated worker and routes run notices to them
 *
 * Workers never see scheduler state. They receive `RunNotice`s on their own
 * channel and answer on the shared event channel.
 */

use super::plan::WorkPlan;
use super::state::WorkerState;
use crate::core::errors::{SimError, SimResult};
use crate::core::limits::FIRST_PID;
use crate::core::types::Pid;
use crate::process::scheduler::{RunNotice, SchedulerEvent};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

struct WorkerHandle {
    pid: Pid,
    notices: flume::Sender<RunNotice>,
    thread: JoinHandle<()>,
}

/// Set of running worker threads, in slot order
pub struct WorkerPool {
    workers: Vec<WorkerHandle>,
}

impl WorkerPool {
    /// Start one worker per plan; pids are assigned from `FIRST_PID` upward
    ///
    /// Workers report on `events`. Thread creation failure aborts startup.
    pub fn spawn(plans: &[WorkPlan], events: flume::Sender<SchedulerEvent>) -> SimResult<Self> {
        let mut workers = Vec::with_capacity(plans.len());

        for (offset, &plan) in plans.iter().enumerate() {
            let pid = FIRST_PID + offset as Pid;
            let (notice_tx, notice_rx) = flume::unbounded();
            let events = events.clone();

            let thread = thread::Builder::new()
                .name(format!("worker-{}", pid))
                .spawn(move || run_worker(WorkerState::new(pid, plan), notice_rx, events))
                .map_err(|e| SimError::WorkerSpawn {
                    pid,
                    reason: e.to_string(),
                })?;

            debug!(pid, burst = plan.burst, finish = ?plan.finish, "Worker spawned");
            workers.push(WorkerHandle {
                pid,
                notices: notice_tx,
                thread,
            });
        }

        Ok(Self { workers })
    }

    /// Worker handles in slot order
    pub fn pids(&self) -> Vec<Pid> {
        self.workers.iter().map(|w| w.pid).collect()
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Deliver a run notice; returns false if the worker is gone
    ///
    /// A gone worker already reported completion, so the notice is stale.
    pub fn notify(&self, notice: RunNotice) -> bool {
        let Some(worker) = self.workers.iter().find(|w| w.pid == notice.pid) else {
            warn!(pid = notice.pid, "Run notice for unknown worker dropped");
            return false;
        };
        match worker.notices.send(notice) {
            Ok(()) => true,
            Err(_) => {
                debug!(pid = notice.pid, tick = notice.tick, "Run notice to exited worker dropped");
                false
            }
        }
    }

    /// Close every notice channel and wait for the threads to finish
    pub fn join(self) {
        for worker in self.workers {
            drop(worker.notices);
            if worker.thread.join().is_err() {
                warn!(pid = worker.pid, "Worker thread panicked");
            }
        }
    }
}

fn run_worker(
    mut state: WorkerState,
    notices: flume::Receiver<RunNotice>,
    events: flume::Sender<SchedulerEvent>,
) {
    while let Ok(notice) = notices.recv() {
        let Some(event) = state.on_run(&notice) else {
            continue;
        };
        if events.send(event).is_err() {
            break;
        }
        if state.is_exited() {
            break;
        }
    }
}
