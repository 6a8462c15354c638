/*!
 * Lockstep Driver
 * Deterministic, single-threaded replay of the real-time protocol
 *
 * Each step dispatches, applies one tick and hands the run notice straight to
 * the owning worker, whose reply is applied before the next step. With a
 * fixed random source every run of the same plans yields the same timeline.
 */

use super::{draw_plans, pids_for};
use crate::core::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Pid, Tick};
use crate::monitoring::{generate_run_id, span_run};
use crate::process::scheduler::{RandomSource, Scheduler, SchedulerBuilder};
use crate::report::Report;
use crate::worker::{WorkPlan, WorkerState};
use tracing::{debug, info, warn};

/// Deterministic driver owning the scheduler and every worker
pub struct Lockstep {
    scheduler: Scheduler,
    workers: Vec<WorkerState>,
    timeline: Vec<Option<Pid>>,
    max_ticks: Option<Tick>,
}

impl Lockstep {
    /// Seeded from the configuration, with plans drawn from it
    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        let plans = draw_plans(config);
        Self::new(&plans, config)
    }

    /// Explicit plans, scheduler randomness from the configured seed
    pub fn new(plans: &[WorkPlan], config: &SimConfig) -> SimResult<Self> {
        Self::assemble(plans, config, None)
    }

    /// Explicit plans and random source
    pub fn with_random(
        plans: &[WorkPlan],
        config: &SimConfig,
        random: impl RandomSource + 'static,
    ) -> SimResult<Self> {
        let random: Box<dyn RandomSource> = Box::new(random);
        Self::assemble(plans, config, Some(random))
    }

    fn assemble(
        plans: &[WorkPlan],
        config: &SimConfig,
        random: Option<Box<dyn RandomSource>>,
    ) -> SimResult<Self> {
        config.validate()?;

        let pids = pids_for(plans.len());
        let workers = pids
            .iter()
            .zip(plans)
            .map(|(&pid, &plan)| WorkerState::new(pid, plan))
            .collect();

        let mut builder = SchedulerBuilder::from_config(config, pids);
        if let Some(random) = random {
            builder = builder.with_random(random);
        }

        Ok(Self {
            scheduler: builder.build(),
            workers,
            timeline: Vec::new(),
            max_ticks: config.max_ticks,
        })
    }

    /// Advance one tick; returns the pid charged for it
    pub fn step(&mut self) -> Option<Pid> {
        self.scheduler.dispatch();
        let notice = self.scheduler.on_tick();

        if let Some(notice) = notice {
            let reply = self
                .scheduler
                .table()
                .slot_of(notice.pid)
                .and_then(|slot| self.workers.get_mut(slot))
                .and_then(|worker| worker.on_run(&notice));
            if let Some(event) = reply {
                debug!(?event, tick = notice.tick, "Worker notification");
                self.scheduler.apply(event);
            }
        }

        let ran = notice.map(|n| n.pid);
        self.timeline.push(ran);
        ran
    }

    /// Step until every process is Done
    pub fn run(&mut self) -> SimResult<Report> {
        let span = span_run(generate_run_id(), "lockstep", self.workers.len());
        let _enter = span.enter();

        while !self.scheduler.all_done() {
            if let Some(limit) = self.max_ticks {
                if self.scheduler.ticks() >= limit {
                    warn!(limit, "Tick budget exhausted");
                    return Err(SimError::TickBudgetExhausted { limit });
                }
            }
            self.step();
        }

        info!(ticks = self.scheduler.ticks(), "Lockstep run finished");
        Ok(self.report())
    }

    pub fn report(&self) -> Report {
        Report::from_scheduler(&self.scheduler)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn worker(&self, pid: Pid) -> Option<&WorkerState> {
        self.workers.iter().find(|w| w.pid() == pid)
    }

    /// Pid charged for each tick so far; `None` for idle ticks
    pub fn timeline(&self) -> &[Option<Pid>] {
        &self.timeline
    }
}
