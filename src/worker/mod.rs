/*!
 * Worker Module
 * Simulated worker processes: work plans, the worker contract, and the pool
 */

pub mod plan;
pub mod pool;
pub mod state;

// Re-export for convenience
pub use plan::{Finish, WorkPlan};
pub use pool::WorkerPool;
pub use state::WorkerState;
