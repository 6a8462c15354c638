/*!
 * Tick Source
 * Periodic timer task producing one logical tick per period
 *
 * Stopping consumes the handle, so a tick source can only be stopped once.
 * Dropping it without `stop()` aborts the task as a fallback.
 */

use crate::core::errors::{SimError, SimResult};
use crate::process::scheduler::SchedulerEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Control messages for the tick task
#[derive(Debug, Clone, Copy)]
enum TickCommand {
    Stop,
}

/// Handle to the tick background task
pub struct TickSource {
    command_tx: mpsc::UnboundedSender<TickCommand>,
    handle: Option<JoinHandle<u64>>,
    period: Duration,
}

impl TickSource {
    /// Spawn the tick task; must be called from within a tokio runtime
    ///
    /// Every period one `SchedulerEvent::Tick` is sent on `ticks`. Late ticks
    /// are delivered back-to-back rather than skipped.
    pub fn start(period: Duration, ticks: mpsc::UnboundedSender<SchedulerEvent>) -> SimResult<Self> {
        if period.is_zero() {
            return Err(SimError::TimerConfig(
                "tick period must be greater than zero".to_string(),
            ));
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_tick_loop(period, ticks, command_rx));

        info!(period_ms = period.as_millis() as u64, "Tick source started");

        Ok(Self {
            command_tx,
            handle: Some(handle),
            period,
        })
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop the timer and wait for the task; returns the number of ticks fired
    pub async fn stop(mut self) -> u64 {
        let _ = self.command_tx.send(TickCommand::Stop);

        let fired = match self.handle.take() {
            Some(handle) => match handle.await {
                Ok(fired) => fired,
                Err(e) => {
                    warn!("Tick source shutdown error: {}", e);
                    0
                }
            },
            None => 0,
        };

        info!(fired, "Tick source stopped");
        fired
    }
}

async fn run_tick_loop(
    period: Duration,
    ticks: mpsc::UnboundedSender<SchedulerEvent>,
    mut command_rx: mpsc::UnboundedReceiver<TickCommand>,
) -> u64 {
    // First tick one full period after start
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    let mut fired = 0;
    loop {
        tokio::select! {
            biased;

            cmd = command_rx.recv() => match cmd {
                Some(TickCommand::Stop) | None => break,
            },

            _ = interval.tick() => {
                if ticks.send(SchedulerEvent::Tick).is_err() {
                    break;
                }
                fired += 1;
            }
        }
    }
    fired
}

impl Drop for TickSource {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            warn!("TickSource dropped without calling stop() - aborting timer task");
            handle.abort();
        }
    }
}
