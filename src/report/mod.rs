/*!
 * Results Report
 * Per-process summary and averages, rendered as console text or JSON
 */

use crate::core::errors::SimResult;
use crate::core::types::{Pid, Tick};
use crate::process::scheduler::{Scheduler, SchedulerStats};
use crate::process::table::ProcessTable;
use crate::process::types::{ProcessRecord, ProcessState};
use serde::Serialize;
use std::fmt;

/// Final accounting for one process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    pub pid: Pid,
    pub state: ProcessState,
    pub wait_ticks: u64,
    pub run_ticks: u64,
    pub sleep_ticks: u64,
    /// `end_tick - start_tick`; elapsed time so far for unfinished processes
    pub turnaround: Tick,
}

impl ProcessSummary {
    fn from_record(record: &ProcessRecord, now: Tick) -> Self {
        let end = record.end_tick.unwrap_or(now);
        Self {
            pid: record.pid,
            state: record.state,
            wait_ticks: record.wait_ticks,
            run_ticks: record.run_ticks,
            sleep_ticks: record.sleep_ticks,
            turnaround: end.saturating_sub(record.start_tick),
        }
    }
}

/// Arithmetic means over every process
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Averages {
    pub wait: f64,
    pub run: f64,
    pub turnaround: f64,
}

impl Averages {
    fn of(processes: &[ProcessSummary]) -> Self {
        if processes.is_empty() {
            return Self::default();
        }
        let n = processes.len() as f64;
        let mean = |f: fn(&ProcessSummary) -> u64| processes.iter().map(f).sum::<u64>() as f64 / n;
        Self {
            wait: mean(|p| p.wait_ticks),
            run: mean(|p| p.run_ticks),
            turnaround: mean(|p| p.turnaround),
        }
    }
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub processes: Vec<ProcessSummary>,
    pub averages: Averages,
    pub total_ticks: Tick,
    pub stats: SchedulerStats,
}

impl Report {
    /// Summarize a table as of tick `now`
    pub fn new(table: &ProcessTable, now: Tick, stats: SchedulerStats) -> Self {
        let processes: Vec<ProcessSummary> = table
            .iter()
            .map(|record| ProcessSummary::from_record(record, now))
            .collect();
        let averages = Averages::of(&processes);
        Self {
            processes,
            averages,
            total_ticks: now,
            stats,
        }
    }

    pub fn from_scheduler(scheduler: &Scheduler) -> Self {
        Self::new(scheduler.table(), scheduler.ticks(), scheduler.stats())
    }

    pub fn summary(&self, pid: Pid) -> Option<&ProcessSummary> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Results ===")?;
        for p in &self.processes {
            writeln!(
                f,
                "PID {}: state={}, wait_ticks={}, run_ticks={}, turnaround={}",
                p.pid, p.state, p.wait_ticks, p.run_ticks, p.turnaround
            )?;
        }
        writeln!(f, "Average wait time: {:.2} ticks", self.averages.wait)?;
        writeln!(f, "Average run time: {:.2} ticks", self.averages.run)?;
        write!(f, "Average turnaround time: {:.2} ticks", self.averages.turnaround)
    }
}
