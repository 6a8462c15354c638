/*!
 * Scheduler Randomness
 * Seam for the two random choices the scheduler makes
 */

use crate::core::types::Slot;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Source of I/O durations and the initial scan reference
pub trait RandomSource: Send {
    /// Sleep length, in ticks, for a process entering Sleeping
    fn io_duration(&mut self, range: &RangeInclusive<u32>) -> u32;

    /// Reference slot for a selection scan when nothing has run yet
    fn start_index(&mut self, len: usize) -> Slot;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn io_duration(&mut self, range: &RangeInclusive<u32>) -> u32 {
        (**self).io_duration(range)
    }

    fn start_index(&mut self, len: usize) -> Slot {
        (**self).start_index(len)
    }
}

/// `StdRng`-backed source, seeded for reproducible runs or from entropy
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl RandomSource for SeededRandom {
    fn io_duration(&mut self, range: &RangeInclusive<u32>) -> u32 {
        if range.start() >= range.end() {
            return *range.start();
        }
        self.rng.gen_range(range.clone())
    }

    fn start_index(&mut self, len: usize) -> Slot {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Fixed answers, for scenarios that must replay exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRandom {
    pub io_duration: u32,
    pub start_index: Slot,
}

impl FixedRandom {
    pub const fn new(io_duration: u32, start_index: Slot) -> Self {
        Self {
            io_duration,
            start_index,
        }
    }
}

impl RandomSource for FixedRandom {
    fn io_duration(&mut self, _range: &RangeInclusive<u32>) -> u32 {
        self.io_duration
    }

    fn start_index(&mut self, len: usize) -> Slot {
        self.start_index % len.max(1)
    }
}
