/*!
 * Real-Time Simulation
 * Drives the scheduler from a wall-clock tick source and worker threads
 *
 * One loop owns the scheduler and applies ticks and worker notifications
 * in arrival order. Worker notifications already queued when a tick arrives
 * are applied before that tick, so a completion always beats the next
 * scheduling decision for its process.
 */

use super::draw_plans;
use super::ticker::TickSource;
use crate::core::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::monitoring::{generate_run_id, span_run};
use crate::process::scheduler::{
    RandomSource, RunNotice, Scheduler, SchedulerBuilder, SchedulerEvent,
};
use crate::report::Report;
use crate::worker::{WorkPlan, WorkerPool};
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Instrument};

/// One real-time run
pub struct Simulation {
    config: SimConfig,
    plans: Option<Vec<WorkPlan>>,
    random: Option<Box<dyn RandomSource>>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            plans: None,
            random: None,
        }
    }

    /// Use explicit work plans instead of drawing them from the configuration
    ///
    /// The number of processes follows the number of plans.
    pub fn with_plans(mut self, plans: Vec<WorkPlan>) -> Self {
        self.plans = Some(plans);
        self
    }

    /// Replace the scheduler's random source
    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        let random: Box<dyn RandomSource> = Box::new(random);
        self.random = Some(random);
        self
    }

    /// Run until every process is Done and return the report
    ///
    /// Must be awaited inside a tokio runtime.
    pub async fn run(self) -> SimResult<Report> {
        let processes = self.plans.as_ref().map_or(self.config.processes, Vec::len);
        let span = span_run(generate_run_id(), "realtime", processes);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(self) -> SimResult<Report> {
        let Simulation {
            config,
            plans,
            random,
        } = self;
        config.validate()?;

        let plans = plans.unwrap_or_else(|| draw_plans(&config));
        let (event_tx, event_rx) = flume::unbounded();
        let pool = WorkerPool::spawn(&plans, event_tx)?;

        let mut builder = SchedulerBuilder::from_config(&config, pool.pids());
        if let Some(random) = random {
            builder = builder.with_random(random);
        }
        let mut scheduler = builder.build();

        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let ticker = match TickSource::start(config.tick_period, tick_tx) {
            Ok(ticker) => ticker,
            Err(e) => {
                shutdown_pool(pool).await;
                return Err(e);
            }
        };

        info!(
            processes = pool.len(),
            tick_ms = config.tick_period.as_millis() as u64,
            "Simulation started"
        );

        let outcome = drive(&mut scheduler, &pool, &event_rx, &mut tick_rx, &config).await;

        let fired = ticker.stop().await;
        shutdown_pool(pool).await;
        outcome?;

        info!(ticks = scheduler.ticks(), fired, "Simulation finished");
        Ok(Report::from_scheduler(&scheduler))
    }
}

async fn drive(
    scheduler: &mut Scheduler,
    pool: &WorkerPool,
    events: &flume::Receiver<SchedulerEvent>,
    ticks: &mut mpsc::UnboundedReceiver<SchedulerEvent>,
    config: &SimConfig,
) -> SimResult<()> {
    loop {
        if scheduler.all_done() {
            return Ok(());
        }
        if let Some(limit) = config.max_ticks {
            if scheduler.ticks() >= limit {
                warn!(limit, "Tick budget exhausted");
                return Err(SimError::TickBudgetExhausted { limit });
            }
        }

        tokio::select! {
            biased;

            event = events.recv_async() => {
                let event = event.map_err(|_| {
                    SimError::ChannelClosed("every worker hung up before completing".to_string())
                })?;
                debug!(?event, "Worker notification");
                scheduler.apply(event);
            }

            tick = ticks.recv() => {
                let tick = tick.ok_or_else(|| {
                    SimError::ChannelClosed("tick source stopped early".to_string())
                })?;
                if let Some(notice) = on_tick_arrival(scheduler, events, tick) {
                    pool.notify(notice);
                }
            }

            // Idle wakeup so all_done() is re-polled at least once per period
            _ = tokio::time::sleep(config.tick_period) => {}
        }
    }
}

/// Apply one tick from the tick source
///
/// Worker events already queued are applied first, then the CPU is
/// dispatched, so a completion always beats this tick's decision for its
/// process and a reply to the previous notice is never overtaken.
fn on_tick_arrival(
    scheduler: &mut Scheduler,
    events: &flume::Receiver<SchedulerEvent>,
    tick: SchedulerEvent,
) -> Option<RunNotice> {
    while let Ok(event) = events.try_recv() {
        debug!(?event, "Worker notification");
        scheduler.apply(event);
    }
    scheduler.dispatch();
    scheduler.apply(tick)
}

async fn shutdown_pool(pool: WorkerPool) {
    if let Err(e) = tokio::task::spawn_blocking(move || pool.join()).await {
        warn!("Worker pool shutdown error: {}", e);
    }
}
