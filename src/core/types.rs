/*!
 * Core Types
 * Common types used across the simulator
 */

/// Stable handle of a simulated worker process
pub type Pid = u32;

/// 0-based position of a process in the process table (circular scan order)
pub type Slot = usize;

/// Logical tick counter
pub type Tick = u64;
