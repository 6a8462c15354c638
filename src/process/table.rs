/*!
 * Process Table
 * Fixed-size slot -> record store; slot order is the circular scan order
 */

use super::types::{ProcessRecord, ProcessState};
use crate::core::types::{Pid, Slot, Tick};
use ahash::RandomState;
use std::collections::HashMap;

/// Fixed-size mapping from slot index to process record
///
/// No insertion or removal after construction. Done records are retained
/// for reporting.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    records: Vec<ProcessRecord>,
    // Pid -> slot index for O(1) notification routing
    slots: HashMap<Pid, Slot, RandomState>,
}

impl ProcessTable {
    /// Create one Ready record per pid, in the given order
    pub fn new(pids: &[Pid], quantum: u32, start_tick: Tick) -> Self {
        let records: Vec<ProcessRecord> = pids
            .iter()
            .map(|&pid| ProcessRecord::new(pid, quantum, start_tick))
            .collect();

        let mut slots = HashMap::with_capacity_and_hasher(pids.len(), RandomState::new());
        for (slot, &pid) in pids.iter().enumerate() {
            let previous = slots.insert(pid, slot);
            debug_assert!(previous.is_none(), "duplicate pid {} in process table", pid);
        }

        Self { records, slots }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `slot`
    #[inline]
    pub fn get(&self, slot: Slot) -> Option<&ProcessRecord> {
        self.records.get(slot)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, slot: Slot) -> Option<&mut ProcessRecord> {
        self.records.get_mut(slot)
    }

    /// Slot owning `pid`
    #[inline]
    pub fn slot_of(&self, pid: Pid) -> Option<Slot> {
        self.slots.get(&pid).copied()
    }

    /// Change the state of `slot`; Done is terminal and never left
    ///
    /// Returns false when the slot does not exist or is already Done.
    pub(crate) fn set_state(&mut self, slot: Slot, state: ProcessState) -> bool {
        match self.records.get_mut(slot) {
            Some(record) if !record.is_done() => {
                record.state = state;
                true
            }
            _ => false,
        }
    }

    /// Records in slot order
    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> + '_ {
        self.records.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ProcessRecord> + '_ {
        self.records.iter_mut()
    }

    /// True iff every record is Done
    pub fn all_done(&self) -> bool {
        self.records.iter().all(ProcessRecord::is_done)
    }

    /// Number of records currently in `state`
    pub fn count(&self, state: ProcessState) -> usize {
        self.records.iter().filter(|r| r.state == state).count()
    }

    /// Pids in slot order
    pub fn pids(&self) -> Vec<Pid> {
        self.records.iter().map(|r| r.pid).collect()
    }
}
