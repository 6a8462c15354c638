/*!
 * Configuration Loading Tests
 * File-based configuration layered under environment overrides
 */

use pretty_assertions::assert_eq;
use rr_scheduler_sim::{Lockstep, ReportFormat, RunMode, SimConfig, SimError};
use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_then_overrides() {
    let file = write_config(r#"{ "processes": 3, "tick_ms": 5, "mode": "lockstep", "seed": 9 }"#);
    let base = SimConfig::from_file(file.path()).unwrap();
    assert_eq!(base.processes, 3);
    assert_eq!(base.tick_period, Duration::from_millis(5));
    assert_eq!(base.mode, RunMode::Lockstep);

    let env: HashMap<&str, &str> = [("SIM_QUANTUM", "2"), ("SIM_REPORT", "json")].into();
    let config = base
        .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
        .unwrap();
    config.validate().unwrap();

    assert_eq!(config.quantum, 2);
    assert_eq!(config.report_format, ReportFormat::Json);
    assert_eq!(config.processes, 3);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = SimConfig::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(SimError::ConfigIo { .. })));
}

#[test]
fn test_malformed_file() {
    let file = write_config("{ processes: ");
    assert!(matches!(
        SimConfig::from_file(file.path()),
        Err(SimError::Serialization(_))
    ));
}

#[test]
fn test_seeded_file_config_replays() {
    let file = write_config(r#"{ "processes": 4, "seed": 123, "quantum": 2 }"#);
    let config = SimConfig::from_file(file.path()).unwrap();

    let mut replay = Lockstep::from_config(&config).unwrap();
    assert_eq!(replay.scheduler().quantum(), 2);

    let first = replay.run().unwrap();
    let second = Lockstep::from_config(&config).unwrap().run().unwrap();
    assert_eq!(first.processes, second.processes);
    assert_eq!(first.total_ticks, second.total_ticks);
}
