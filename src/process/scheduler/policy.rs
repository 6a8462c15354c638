/*!
 * Selection Policy
 * Starvation guard and circular next-process scan
 */

use super::Scheduler;
use crate::core::types::Slot;
use crate::process::types::ProcessState;
use tracing::debug;

impl Scheduler {
    /// Select the next process if the CPU is idle
    ///
    /// Returns the slot moved Ready -> Running, or `None` when something is
    /// already Running, everything is Done, or no process is Ready.
    pub fn dispatch(&mut self) -> Option<Slot> {
        if self.current.is_some() || self.table.count(ProcessState::Ready) == 0 {
            return None;
        }

        self.refill_if_starved();

        let reference = match self.last_run {
            Some(slot) => slot,
            None => self.random.start_index(self.table.len()),
        };
        let slot = self.next_ready(reference)?;

        self.table.set_state(slot, ProcessState::Running);
        self.current = Some(slot);
        if self.last_run != Some(slot) {
            self.stats.context_switches += 1;
        }
        self.last_run = Some(slot);
        self.stats.dispatches += 1;

        if let Some(record) = self.table.get(slot) {
            debug!(
                pid = record.pid,
                slot,
                quantum = record.quantum_remaining,
                tick = self.ticks,
                "Dispatched process"
            );
        }
        self.debug_check_single_running();

        Some(slot)
    }

    /// Refill every Ready quantum when all Ready processes are exhausted
    ///
    /// Returns true if a refill happened.
    pub(super) fn refill_if_starved(&mut self) -> bool {
        let starved = self.table.count(ProcessState::Ready) > 0
            && !self
                .table
                .iter()
                .any(|r| r.is_ready() && r.quantum_remaining > 0);
        if !starved {
            return false;
        }

        let quantum = self.quantum;
        for record in self.table.iter_mut().filter(|r| r.is_ready()) {
            record.quantum_remaining = quantum;
        }
        self.stats.refills += 1;
        debug!(tick = self.ticks, quantum, "Ready set exhausted, quanta refilled");
        true
    }

    /// First Ready slot after `reference` with quantum left, else first Ready slot
    pub(super) fn next_ready(&self, reference: Slot) -> Option<Slot> {
        let len = self.table.len();
        if len == 0 {
            return None;
        }
        let scan = || (1..=len).map(move |step| (reference + step) % len);

        let ready_with_quantum = scan().find(|&slot| {
            self.table
                .get(slot)
                .is_some_and(|r| r.is_ready() && r.quantum_remaining > 0)
        });

        ready_with_quantum
            .or_else(|| scan().find(|&slot| self.table.get(slot).is_some_and(|r| r.is_ready())))
    }
}
