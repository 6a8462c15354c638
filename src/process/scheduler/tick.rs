/*!
 * Tick Handler
 * Per-tick aging, I/O countdown and preemption of the running process
 */

use super::events::RunNotice;
use super::Scheduler;
use crate::process::types::ProcessState;
use tracing::{debug, trace};

impl Scheduler {
    /// Advance the simulation by one logical tick
    ///
    /// Returns the run notification owed to the process that held the CPU
    /// during this tick, if any.
    pub fn on_tick(&mut self) -> Option<RunNotice> {
        self.ticks += 1;
        self.stats.ticks += 1;
        let tick = self.ticks;
        let quantum = self.quantum;

        // Sleeping: count down I/O, wake with a refilled quantum if it ran dry
        for record in self.table.iter_mut().filter(|r| r.is_sleeping()) {
            record.io_remaining = record.io_remaining.saturating_sub(1);
            if record.io_remaining == 0 {
                record.state = ProcessState::Ready;
                record.wakeups += 1;
                if record.quantum_remaining == 0 {
                    record.quantum_remaining = quantum;
                }
                self.stats.wakeups += 1;
                debug!(pid = record.pid, tick, "I/O finished, process ready");
            } else {
                record.sleep_ticks += 1;
            }
        }

        // Ready: age
        for record in self.table.iter_mut().filter(|r| r.is_ready()) {
            record.wait_ticks += 1;
        }

        // Running: charge one unit of CPU
        let slot = self.current?;
        let Some(record) = self.table.get_mut(slot).filter(|r| r.is_running()) else {
            // Done wins over any in-flight decision for this slot
            self.current = None;
            return None;
        };

        record.quantum_remaining = record.quantum_remaining.saturating_sub(1);
        record.run_ticks += 1;
        let notice = RunNotice {
            pid: record.pid,
            tick,
            wakeups: record.wakeups,
        };
        trace!(pid = record.pid, tick, "Run notification");

        if std::mem::take(&mut self.io_pending[slot]) {
            record.state = ProcessState::Sleeping;
            record.io_remaining = self.random.io_duration(&self.io_range);
            self.current = None;
            self.stats.io_blocks += 1;
            debug!(
                pid = record.pid,
                tick,
                io_ticks = record.io_remaining,
                "Process blocked on I/O"
            );
        } else if record.quantum_remaining == 0 {
            record.state = ProcessState::Ready;
            self.current = None;
            self.stats.preemptions += 1;
            debug!(pid = record.pid, tick, "Quantum exhausted, process preempted");
        }

        self.debug_check_single_running();
        Some(notice)
    }
}
