/*!
 * Runtime Module
 * Drivers that feed ticks and worker notifications into the scheduler core
 */

pub mod lockstep;
pub mod simulation;
pub mod ticker;

// Re-export for convenience
pub use lockstep::Lockstep;
pub use simulation::Simulation;
pub use ticker::TickSource;

use crate::core::config::SimConfig;
use crate::core::limits::FIRST_PID;
use crate::core::types::Pid;
use crate::worker::WorkPlan;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Draw one work plan per process from the configured bounds
///
/// Seeded configurations always produce the same plans.
pub fn draw_plans(config: &SimConfig) -> Vec<WorkPlan> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let bursts = config.burst_range();
    (0..config.processes)
        .map(|_| WorkPlan::random(&mut rng, &bursts, config.io_probability))
        .collect()
}

/// Handles for `count` workers, matching what the worker pool assigns
pub fn pids_for(count: usize) -> Vec<Pid> {
    (0..count).map(|offset| FIRST_PID + offset as Pid).collect()
}
