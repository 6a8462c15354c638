/*!
 * Scenario Tests
 * Exact, replayable runs through the lockstep driver
 */

use pretty_assertions::assert_eq;
use rr_scheduler_sim::{FixedRandom, Lockstep, ProcessState, SimConfig, WorkPlan};

fn lockstep(plans: &[WorkPlan], quantum: u32, random: FixedRandom) -> Lockstep {
    let config = SimConfig::default().with_quantum(quantum);
    Lockstep::with_random(plans, &config, random).unwrap()
}

#[test]
fn test_single_process_no_io() {
    let mut sim = lockstep(&[WorkPlan::exit_after(3)], 1, FixedRandom::new(1, 0));
    let report = sim.run().unwrap();

    let p = report.summary(1).unwrap();
    assert_eq!(p.state, ProcessState::Done);
    assert_eq!(p.run_ticks, 3);
    assert_eq!(p.wait_ticks, 0);
    assert_eq!(p.turnaround, 3);
    assert_eq!(report.total_ticks, 3);
}

#[test]
fn test_io_then_exit_interleaves_with_pure_cpu_process() {
    // Slot 0 (pid 1) goes first: the scan starts after reference slot 1
    let plans = [WorkPlan::io_after(1), WorkPlan::exit_after(2)];
    let mut sim = lockstep(&plans, 1, FixedRandom::new(2, 1));
    let report = sim.run().unwrap();

    assert_eq!(sim.timeline(), &[Some(1), Some(2), Some(2), Some(1)]);

    let a = report.summary(1).unwrap();
    assert_eq!((a.run_ticks, a.wait_ticks, a.sleep_ticks, a.turnaround), (2, 1, 1, 4));

    let b = report.summary(2).unwrap();
    assert_eq!((b.run_ticks, b.wait_ticks, b.sleep_ticks, b.turnaround), (2, 1, 0, 3));

    assert_eq!(report.averages.wait, 1.0);
    assert_eq!(report.averages.run, 2.0);
    assert_eq!(report.averages.turnaround, 3.5);
    assert_eq!(report.stats.io_blocks, 1);
    assert_eq!(report.stats.wakeups, 1);
}

#[test]
fn test_quantum_exhaustion_mid_burst() {
    let plans = [WorkPlan::exit_after(3), WorkPlan::exit_after(1)];
    let mut sim = lockstep(&plans, 2, FixedRandom::new(1, 1));

    assert_eq!(sim.step(), Some(1));
    assert_eq!(sim.step(), Some(1));

    // Preempted with one unit left; the other process gets the CPU next
    assert_eq!(sim.worker(1).unwrap().remaining(), 1);
    assert_eq!(sim.scheduler().table().get(0).unwrap().state, ProcessState::Ready);
    assert_eq!(sim.step(), Some(2));

    let report = sim.run().unwrap();
    assert_eq!(sim.timeline(), &[Some(1), Some(1), Some(2), Some(1)]);

    let a = report.summary(1).unwrap();
    assert_eq!((a.run_ticks, a.wait_ticks, a.turnaround), (3, 1, 4));
    let b = report.summary(2).unwrap();
    assert_eq!((b.run_ticks, b.wait_ticks, b.turnaround), (1, 2, 3));
    assert_eq!(report.stats.preemptions, 1);
}

#[test]
fn test_idle_ticks_while_everyone_sleeps() {
    let mut sim = lockstep(&[WorkPlan::io_after(1)], 1, FixedRandom::new(3, 0));
    let report = sim.run().unwrap();

    assert_eq!(sim.timeline(), &[Some(1), None, None, None, Some(1)]);

    let p = report.summary(1).unwrap();
    assert_eq!((p.run_ticks, p.wait_ticks, p.sleep_ticks, p.turnaround), (2, 1, 2, 5));
}

#[test]
fn test_latched_io_request_sleeps_on_next_tick() {
    // Quantum outlasts the burst, so the request lands while still Running
    let plans = [WorkPlan::io_after(1), WorkPlan::exit_after(1)];
    let mut sim = lockstep(&plans, 4, FixedRandom::new(2, 1));

    assert_eq!(sim.step(), Some(1));
    assert!(sim.scheduler().io_pending(0));

    let report = sim.run().unwrap();
    assert_eq!(sim.timeline(), &[Some(1), Some(1), Some(2), None, Some(1)]);

    let a = report.summary(1).unwrap();
    assert_eq!((a.run_ticks, a.wait_ticks, a.sleep_ticks, a.turnaround), (3, 1, 1, 5));
}

#[test]
fn test_zero_burst_worker_finishes_on_first_slice() {
    let mut sim = lockstep(&[WorkPlan::exit_after(0)], 1, FixedRandom::new(1, 0));
    let report = sim.run().unwrap();
    assert_eq!(report.summary(1).unwrap().run_ticks, 1);
}
