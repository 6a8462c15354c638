/*!
 * Simulator Configuration
 *
 * Layered configuration: built-in defaults, then an optional JSON file named
 * by `SIM_CONFIG`, then `SIM_*` environment overrides.
 */

use super::errors::{SimError, SimResult};
use super::limits::*;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable naming an optional JSON configuration file
pub const CONFIG_PATH_VAR: &str = "SIM_CONFIG";

/// How the simulation is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Wall-clock tick source and thread-backed workers
    #[default]
    Realtime,
    /// Deterministic logical ticks, no wall clock
    Lockstep,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "realtime" | "real_time" | "rt" => Ok(Self::Realtime),
            "lockstep" | "step" => Ok(Self::Lockstep),
            _ => Err(format!("Invalid mode '{}'. Valid: realtime, lockstep", s)),
        }
    }
}

/// Output format of the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "console" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid report format '{}'. Valid: text, json", s)),
        }
    }
}

/// Simulation tunables
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimConfig {
    /// Number of simulated processes (N)
    pub processes: usize,
    /// Initial and refill quantum, in ticks
    pub quantum: u32,
    /// Period of the real-time tick source
    #[serde(rename = "tick_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub tick_period: Duration,
    pub io_min: u32,
    pub io_max: u32,
    pub burst_min: u32,
    pub burst_max: u32,
    pub io_probability: f64,
    /// Seed for work plans and I/O durations; entropy when absent
    pub seed: Option<u64>,
    pub mode: RunMode,
    pub report_format: ReportFormat,
    /// Optional safety budget; absent means wait forever
    pub max_ticks: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            processes: DEFAULT_PROCESSES,
            quantum: DEFAULT_QUANTUM,
            tick_period: DEFAULT_TICK_PERIOD,
            io_min: DEFAULT_IO_MIN,
            io_max: DEFAULT_IO_MAX,
            burst_min: DEFAULT_BURST_MIN,
            burst_max: DEFAULT_BURST_MAX,
            io_probability: DEFAULT_IO_PROBABILITY,
            seed: None,
            mode: RunMode::default(),
            report_format: ReportFormat::default(),
            max_ticks: None,
        }
    }
}

impl SimConfig {
    /// Load defaults, the optional `SIM_CONFIG` file and environment overrides, then validate
    pub fn load() -> SimResult<Self> {
        let base = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        let config = base.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Apply `SIM_*` overrides using `lookup` to resolve variable names
    pub fn apply_overrides<F>(mut self, lookup: F) -> SimResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("SIM_PROCESSES") {
            self.processes = parse_var("SIM_PROCESSES", &raw)?;
        }
        if let Some(raw) = lookup("SIM_QUANTUM") {
            self.quantum = parse_var("SIM_QUANTUM", &raw)?;
        }
        if let Some(raw) = lookup("SIM_TICK_MS") {
            self.tick_period = Duration::from_millis(parse_var("SIM_TICK_MS", &raw)?);
        }
        if let Some(raw) = lookup("SIM_IO_MIN") {
            self.io_min = parse_var("SIM_IO_MIN", &raw)?;
        }
        if let Some(raw) = lookup("SIM_IO_MAX") {
            self.io_max = parse_var("SIM_IO_MAX", &raw)?;
        }
        if let Some(raw) = lookup("SIM_BURST_MIN") {
            self.burst_min = parse_var("SIM_BURST_MIN", &raw)?;
        }
        if let Some(raw) = lookup("SIM_BURST_MAX") {
            self.burst_max = parse_var("SIM_BURST_MAX", &raw)?;
        }
        if let Some(raw) = lookup("SIM_IO_PROBABILITY") {
            self.io_probability = parse_var("SIM_IO_PROBABILITY", &raw)?;
        }
        if let Some(raw) = lookup("SIM_SEED") {
            self.seed = Some(parse_var("SIM_SEED", &raw)?);
        }
        if let Some(raw) = lookup("SIM_MODE") {
            self.mode = parse_var("SIM_MODE", &raw)?;
        }
        if let Some(raw) = lookup("SIM_REPORT") {
            self.report_format = parse_var("SIM_REPORT", &raw)?;
        }
        if let Some(raw) = lookup("SIM_MAX_TICKS") {
            self.max_ticks = Some(parse_var("SIM_MAX_TICKS", &raw)?);
        }
        Ok(self)
    }

    /// Reject tunables the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        if self.processes == 0 || self.processes > MAX_PROCESSES {
            return Err(SimError::config(
                "processes",
                format!("must be between 1 and {}", MAX_PROCESSES),
            ));
        }
        if self.quantum == 0 {
            return Err(SimError::config("quantum", "must be at least 1 tick"));
        }
        if self.tick_period.is_zero() {
            return Err(SimError::TimerConfig(
                "tick period must be greater than zero".to_string(),
            ));
        }
        if self.io_min == 0 || self.io_min > self.io_max {
            return Err(SimError::config(
                "io_min",
                format!(
                    "I/O range {}..={} must be non-empty and start at 1 or more",
                    self.io_min, self.io_max
                ),
            ));
        }
        if self.burst_min == 0 || self.burst_min > self.burst_max {
            return Err(SimError::config(
                "burst_min",
                format!(
                    "burst range {}..={} must be non-empty and start at 1 or more",
                    self.burst_min, self.burst_max
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.io_probability) {
            return Err(SimError::config(
                "io_probability",
                "must be within 0.0 and 1.0",
            ));
        }
        Ok(())
    }

    /// I/O sleep duration bounds in ticks
    #[inline]
    pub fn io_range(&self) -> RangeInclusive<u32> {
        self.io_min..=self.io_max
    }

    /// Work burst bounds in units
    #[inline]
    pub fn burst_range(&self) -> RangeInclusive<u32> {
        self.burst_min..=self.burst_max
    }

    pub fn with_processes(mut self, processes: usize) -> Self {
        self.processes = processes;
        self
    }

    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn with_io_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.io_min = *range.start();
        self.io_max = *range.end();
        self
    }

    pub fn with_burst_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.burst_min = *range.start();
        self.burst_max = *range.end();
        self
    }

    pub fn with_io_probability(mut self, probability: f64) -> Self {
        self.io_probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_ticks(mut self, limit: u64) -> Self {
        self.max_ticks = Some(limit);
        self
    }
}

fn parse_var<T>(key: &str, raw: &str) -> SimResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| SimError::config(key, format!("'{}': {}", raw, e)))
}
