/*!
 * Simulator Limits and Defaults
 *
 * Centralized location for the recognized tunables and their bounds.
 * Every default here can be overridden through `SimConfig`.
 */

use std::time::Duration;

// =============================================================================
// PROCESS SET
// =============================================================================

/// Default number of simulated processes
pub const DEFAULT_PROCESSES: usize = 10;

/// Upper bound on simulated processes
/// Each worker owns an OS thread, so this also bounds thread creation
pub const MAX_PROCESSES: usize = 1024;

/// First handle handed out by the worker pool
pub const FIRST_PID: u32 = 1;

// =============================================================================
// SCHEDULING
// =============================================================================

/// Initial (and refill) quantum in ticks
pub const DEFAULT_QUANTUM: u32 = 1;

/// Tick period of the real-time tick source
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

// =============================================================================
// I/O AND WORK
// =============================================================================

/// Shortest I/O sleep in ticks
pub const DEFAULT_IO_MIN: u32 = 1;

/// Longest I/O sleep in ticks
pub const DEFAULT_IO_MAX: u32 = 5;

/// Smallest work burst a worker draws
pub const DEFAULT_BURST_MIN: u32 = 1;

/// Largest work burst a worker draws
pub const DEFAULT_BURST_MAX: u32 = 10;

/// Chance that a worker ends its burst with an I/O request instead of exiting
pub const DEFAULT_IO_PROBABILITY: f64 = 0.5;
