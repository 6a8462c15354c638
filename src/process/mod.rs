/*!
 * Process Module
 * Process control records, the fixed-size record store, and the CPU scheduler
 */

pub mod scheduler;
pub mod table;
pub mod types;

// Re-export for convenience
pub use scheduler::{
    FixedRandom, RandomSource, RunNotice, Scheduler, SchedulerBuilder, SchedulerEvent,
    SchedulerStats, SeededRandom,
};
pub use table::ProcessTable;
pub use types::{ProcessRecord, ProcessState};
