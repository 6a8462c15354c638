/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use super::types::{Pid, Tick};
use miette::Diagnostic;
use thiserror::Error;

/// Result alias for fallible simulator operations
pub type SimResult<T> = Result<T, SimError>;

/// Simulator errors
///
/// Every variant is a startup or driver failure. The per-tick algorithm
/// itself never fails.
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Failed to spawn worker {pid}: {reason}")]
    #[diagnostic(
        code(sim::worker_spawn_failed),
        help("The system may be out of threads or memory. Lower SIM_PROCESSES and retry.")
    )]
    WorkerSpawn { pid: Pid, reason: String },

    #[error("Notification channel closed: {0}")]
    #[diagnostic(
        code(sim::channel_closed),
        help("A notification endpoint went away before every process reached Done.")
    )]
    ChannelClosed(String),

    #[error("Timer configuration failed: {0}")]
    #[diagnostic(
        code(sim::timer_config),
        help("The tick period must be a positive number of milliseconds (SIM_TICK_MS).")
    )]
    TimerConfig(String),

    #[error("Invalid configuration for '{key}': {reason}")]
    #[diagnostic(
        code(sim::invalid_config),
        help("Check the SIM_* environment variables and the SIM_CONFIG file.")
    )]
    Config { key: String, reason: String },

    #[error("Failed to read configuration file {path}")]
    #[diagnostic(code(sim::config_io), help("Check that SIM_CONFIG points to a readable file."))]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    #[diagnostic(code(sim::serialization))]
    Serialization(#[from] serde_json::Error),

    #[error("Simulation did not finish within {limit} ticks")]
    #[diagnostic(
        code(sim::tick_budget_exhausted),
        help("A worker never reported completion. Raise or unset SIM_MAX_TICKS to keep waiting.")
    )]
    TickBudgetExhausted { limit: Tick },
}

impl SimError {
    /// Shorthand for a configuration validation failure
    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SimError::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
