/*!
 * Real-Time Simulation Tests
 * End-to-end runs with worker threads and a short tick period
 */

use pretty_assertions::assert_eq;
use rr_scheduler_sim::{
    FixedRandom, Lockstep, ProcessState, Report, SimConfig, SimError, Simulation, WorkPlan,
};
use std::time::Duration;

fn fast_config() -> SimConfig {
    SimConfig::default()
        .with_tick_period(Duration::from_millis(20))
        .with_quantum(1)
        .with_max_ticks(2_000)
}

fn assert_consistent(report: &Report) {
    for p in &report.processes {
        assert_eq!(p.state, ProcessState::Done);
        assert_eq!(p.wait_ticks + p.run_ticks + p.sleep_ticks, p.turnaround);
    }
}

#[tokio::test]
async fn test_single_process_completes() {
    let report = Simulation::new(fast_config())
        .with_plans(vec![WorkPlan::exit_after(3)])
        .with_random(FixedRandom::new(1, 0))
        .run()
        .await
        .unwrap();

    assert_consistent(&report);
    let p = report.summary(1).unwrap();
    assert_eq!(p.run_ticks, 3);
    assert_eq!(p.wait_ticks, 0);
    assert_eq!(p.turnaround, 3);
}

async fn assert_drivers_agree(plans: Vec<WorkPlan>, config: SimConfig, random: FixedRandom) {
    let expected = Lockstep::with_random(&plans, &config, random)
        .unwrap()
        .run()
        .unwrap();
    let actual = Simulation::new(config)
        .with_plans(plans)
        .with_random(random)
        .run()
        .await
        .unwrap();

    assert_eq!(actual.processes, expected.processes);
    assert_eq!(actual.total_ticks, expected.total_ticks);
}

#[tokio::test]
async fn test_io_after_preempted_slice_matches_lockstep() {
    let config = fast_config().with_io_range(1..=1);
    assert_drivers_agree(vec![WorkPlan::io_after(1)], config, FixedRandom::new(1, 0)).await;
}

#[tokio::test]
async fn test_interleaved_io_and_cpu_match_lockstep() {
    let config = fast_config().with_io_range(2..=2);
    let plans = vec![WorkPlan::io_after(1), WorkPlan::exit_after(2)];
    assert_drivers_agree(plans, config, FixedRandom::new(2, 1)).await;
}

#[tokio::test]
async fn test_io_and_cpu_processes_complete() {
    let report = Simulation::new(fast_config().with_io_range(2..=2))
        .with_plans(vec![WorkPlan::io_after(1), WorkPlan::exit_after(2)])
        .with_random(FixedRandom::new(2, 1))
        .run()
        .await
        .unwrap();

    assert_consistent(&report);
    assert_eq!(report.processes.len(), 2);
    assert_eq!(report.stats.io_blocks, 1);
    assert!(report.summary(1).unwrap().sleep_ticks >= 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_seeded_workload_completes() {
    let config = fast_config()
        .with_tick_period(Duration::from_millis(5))
        .with_processes(5)
        .with_burst_range(1..=3)
        .with_io_range(1..=2)
        .with_seed(7);

    let report = Simulation::new(config).run().await.unwrap();

    assert_eq!(report.processes.len(), 5);
    assert_consistent(&report);
    assert_eq!(report.stats.completions, 5);
}

#[tokio::test]
async fn test_tick_budget_stops_the_run() {
    let config = fast_config()
        .with_tick_period(Duration::from_millis(2))
        .with_max_ticks(3);

    let result = Simulation::new(config)
        .with_plans(vec![WorkPlan::exit_after(50)])
        .run()
        .await;

    assert!(matches!(result, Err(SimError::TickBudgetExhausted { limit: 3 })));
}

#[tokio::test]
async fn test_invalid_config_rejected_before_start() {
    let config = fast_config().with_quantum(0);
    let result = Simulation::new(config)
        .with_plans(vec![WorkPlan::exit_after(1)])
        .run()
        .await;

    assert!(matches!(result, Err(SimError::Config { .. })));
}
