/*!
 * Scheduler Builder
 * Builder pattern for Scheduler construction
 */

use super::random::{RandomSource, SeededRandom};
use super::Scheduler;
use crate::core::config::SimConfig;
use crate::core::limits::{DEFAULT_IO_MAX, DEFAULT_IO_MIN, DEFAULT_QUANTUM};
use crate::core::types::Pid;
use std::ops::RangeInclusive;
use tracing::info;

/// Builder for Scheduler
pub struct SchedulerBuilder {
    pids: Vec<Pid>,
    quantum: u32,
    io_range: RangeInclusive<u32>,
    random: Option<Box<dyn RandomSource>>,
    seed: Option<u64>,
}

impl SchedulerBuilder {
    /// Create a builder with default quantum and I/O range
    pub fn new(pids: Vec<Pid>) -> Self {
        Self {
            pids,
            quantum: DEFAULT_QUANTUM,
            io_range: DEFAULT_IO_MIN..=DEFAULT_IO_MAX,
            random: None,
            seed: None,
        }
    }

    /// Take quantum, I/O range and seed from a configuration
    pub fn from_config(config: &SimConfig, pids: Vec<Pid>) -> Self {
        let builder = Self::new(pids)
            .with_quantum(config.quantum)
            .with_io_range(config.io_range());
        match config.seed {
            Some(seed) => builder.with_seed(seed),
            None => builder,
        }
    }

    /// Initial and refill quantum in ticks
    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = quantum;
        self
    }

    /// Bounds for I/O sleep durations
    pub fn with_io_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.io_range = range;
        self
    }

    /// Seed the default random source
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the random source (takes precedence over a seed)
    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Some(Box::new(random));
        self
    }

    /// Build the scheduler: every process Ready with a full quantum at tick 0
    pub fn build(self) -> Scheduler {
        let random: Box<dyn RandomSource> = match self.random {
            Some(random) => random,
            None => Box::new(SeededRandom::new(self.seed)),
        };

        info!(
            processes = self.pids.len(),
            quantum = self.quantum,
            io_min = *self.io_range.start(),
            io_max = *self.io_range.end(),
            "Scheduler initialized"
        );

        Scheduler::from_parts(&self.pids, self.quantum, self.io_range, random)
    }
}
