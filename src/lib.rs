/*!
 * Round-Robin Scheduler Simulator
 * Single-CPU preemptive scheduling with I/O blocking, exposed as a library
 */

pub mod core;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod runtime;
pub mod worker;

// Re-exports
pub use self::core::{ReportFormat, RunMode, SimConfig, SimError, SimResult};
pub use monitoring::init_tracing;
pub use process::{
    FixedRandom, ProcessRecord, ProcessState, ProcessTable, RandomSource, RunNotice, Scheduler,
    SchedulerEvent, SchedulerStats, SeededRandom,
};
pub use report::{Averages, ProcessSummary, Report};
pub use runtime::{Lockstep, Simulation, TickSource};
pub use worker::{Finish, WorkPlan, WorkerPool, WorkerState};
