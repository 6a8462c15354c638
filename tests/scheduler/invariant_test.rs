/*!
 * Scheduler Invariant Tests
 * Property checks over randomly generated workloads
 */

use proptest::prelude::*;
use rr_scheduler_sim::{Finish, Lockstep, ProcessState, SimConfig, WorkPlan};

fn plan_strategy() -> impl Strategy<Value = WorkPlan> {
    (0u32..6, any::<bool>()).prop_map(|(burst, io)| {
        if io {
            WorkPlan::io_after(burst)
        } else {
            WorkPlan::exit_after(burst)
        }
    })
}

fn workload() -> impl Strategy<Value = (Vec<WorkPlan>, u32, u32, u64)> {
    (
        prop::collection::vec(plan_strategy(), 1..8),
        1u32..4,
        1u32..4,
        any::<u64>(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_at_most_one_running((plans, quantum, io_max, seed) in workload()) {
        let config = SimConfig::default()
            .with_quantum(quantum)
            .with_io_range(1..=io_max)
            .with_seed(seed);
        let mut sim = Lockstep::new(&plans, &config).unwrap();

        let mut steps = 0;
        while !sim.scheduler().all_done() && steps < 10_000 {
            sim.step();
            steps += 1;
            let running = sim.scheduler().table().count(ProcessState::Running);
            prop_assert!(running <= 1);
            prop_assert_eq!(running == 1, sim.scheduler().current().is_some());
        }
        prop_assert!(sim.scheduler().all_done());
    }

    #[test]
    fn prop_accounting_identity((plans, quantum, io_max, seed) in workload()) {
        let config = SimConfig::default()
            .with_quantum(quantum)
            .with_io_range(1..=io_max)
            .with_seed(seed)
            .with_max_ticks(10_000);
        let mut sim = Lockstep::new(&plans, &config).unwrap();
        let report = sim.run().unwrap();

        for p in &report.processes {
            prop_assert_eq!(p.state, ProcessState::Done);
            prop_assert_eq!(p.wait_ticks + p.run_ticks + p.sleep_ticks, p.turnaround);
            prop_assert!(p.turnaround <= report.total_ticks);
        }

        // Every charged tick belongs to exactly one process
        let charged = sim.timeline().iter().filter(|t| t.is_some()).count() as u64;
        let run: u64 = report.processes.iter().map(|p| p.run_ticks).sum();
        prop_assert_eq!(charged, run);
        prop_assert_eq!(sim.timeline().len() as u64, report.total_ticks);
    }

    #[test]
    fn prop_pure_cpu_workers_are_charged_their_burst((plans, quantum, _io_max, seed) in workload()) {
        let config = SimConfig::default().with_quantum(quantum).with_seed(seed);
        let mut sim = Lockstep::new(&plans, &config).unwrap();
        let report = sim.run().unwrap();

        for (plan, p) in plans.iter().zip(&report.processes) {
            if plan.finish == Finish::Exit {
                prop_assert_eq!(p.run_ticks, u64::from(plan.burst.max(1)));
                prop_assert_eq!(p.sleep_ticks, 0);
            } else {
                prop_assert!(p.run_ticks > u64::from(plan.burst));
            }
        }
    }
}
