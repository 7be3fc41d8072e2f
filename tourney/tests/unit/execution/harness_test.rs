use super::*;
use super::harness::WaitResult;
use super::worker::{Worker, WorkerOutcome, WorkerReport, is_panic_output_suppressed};
use crate::evaluation::{BestCost, NO_SOLUTION_COST};
use crate::helpers::models::create_square_problem;
use crate::helpers::strategies::*;
use crate::models::{RunStatus, Solution, Tour};
use crate::strategy::{StrategyEntry, StrategyKind};
use crate::utils::{Environment, InterruptionQuota, silent_logger};
use std::sync::Arc;
use std::sync::mpsc::sync_channel;
use std::thread;

fn create_config(time_budget: Duration, grace_period: Duration) -> ExecutionConfig {
    ExecutionConfig { time_budget, grace_period, poll_interval: Duration::from_millis(10), display_strategy_output: false }
}

fn create_environment() -> Arc<Environment> {
    Arc::new(Environment::new(None, Some(0), silent_logger()))
}

fn run_strategy(entry: StrategyEntry, config: ExecutionConfig) -> Result<Solution, HarnessError> {
    let harness = ExecutionHarness::new(config, create_environment());

    harness.run(RunRequest { strategy: entry, problem: create_square_problem(), repetition: 1, seed: Some(42) })
}

fn get_failure_reason(solution: &Solution) -> &str {
    match &solution.status {
        RunStatus::Failed { reason } => reason.as_str(),
        status => unreachable!("unexpected status: {status:?}"),
    }
}

#[test]
fn can_complete_finished_strategy() {
    let entry = create_scripted_entry("scripted", StrategyKind::Competitor, vec![vec![0, 2, 1, 3], vec![0, 1, 2, 3]]);

    let solution = run_strategy(entry, create_config(Duration::from_secs(10), Duration::from_secs(1)))
        .expect("run should not be stuck");

    assert_eq!(solution.status, RunStatus::Completed);
    assert_eq!(solution.cost, 4.);
    assert_eq!(solution.tour, Some(Tour::identity(4)));
    assert_eq!(solution.evaluations, 3);
    assert_eq!(solution.strategy, "scripted");
    assert_eq!(solution.problem, "square");
    assert_eq!(solution.repetition, 1);
}

#[test]
fn can_terminate_cooperative_strategy_after_time_budget() {
    let entry = create_sleepy_entry("sleepy", Duration::from_millis(10));

    let solution = run_strategy(entry, create_config(Duration::from_millis(200), Duration::from_secs(5)))
        .expect("run should not be stuck");

    assert_eq!(solution.status, RunStatus::Terminated);
    assert_eq!(solution.cost, 4.);
    assert_eq!(solution.evaluations, 1);
    assert!(solution.duration >= Duration::from_millis(200));
}

#[test]
fn can_detect_stuck_strategy() {
    let entry = create_stuck_entry("stuck");

    let result = run_strategy(entry, create_config(Duration::from_millis(200), Duration::from_millis(200)));

    match result {
        Err(HarnessError::Stuck { strategy, problem, repetition, best_cost, grace_period }) => {
            assert_eq!(strategy, "stuck");
            assert_eq!(problem, "square");
            assert_eq!(repetition, 1);
            assert_eq!(best_cost, 4.);
            assert_eq!(grace_period, Duration::from_millis(200));
        }
        Ok(solution) => unreachable!("unexpected solution: {solution:?}"),
    }
}

#[test]
fn can_accept_report_sent_at_deadline() {
    let harness = ExecutionHarness::new(create_config(Duration::from_secs(1), Duration::ZERO), create_environment());
    let (sender, receiver) = sync_channel(1);
    sender
        .send(WorkerReport { outcome: WorkerOutcome::Cancelled, best_cost: 4., best_tour: None, evaluations: 1 })
        .expect("cannot send report");

    let result = harness.wait(Some(&receiver), Duration::ZERO, false);

    match result {
        WaitResult::Report(report) => assert_eq!(report.best_cost, 4.),
        WaitResult::Expired | WaitResult::Disconnected => unreachable!("report should be received"),
    }
}

#[test]
fn can_expire_at_deadline_without_report() {
    let harness = ExecutionHarness::new(create_config(Duration::from_secs(1), Duration::ZERO), create_environment());
    let (_sender, receiver) = sync_channel::<WorkerReport>(1);

    let result = harness.wait(Some(&receiver), Duration::ZERO, false);

    assert!(matches!(result, WaitResult::Expired));
}

#[test]
fn can_suppress_panic_output_of_worker() {
    let worker = Worker {
        entry: create_failing_entry("failing", FailurePhase::Panic),
        problem: create_square_problem(),
        seed: Some(1),
        cancellation: CancellationToken::default(),
        publisher: BestCost::default(),
        listener: None,
        logger: silent_logger(),
        is_output_suppressed: true,
    };

    let (is_failed, is_suppressed) = thread::spawn(move || {
        let report = worker.run();
        (matches!(report.outcome, WorkerOutcome::Failed(_)), is_panic_output_suppressed())
    })
    .join()
    .expect("worker thread should not panic");

    assert!(is_failed);
    assert!(is_suppressed);
}

parameterized_test! {can_convert_strategy_failure_into_solution, (phase, expected_reason), {
    can_convert_strategy_failure_into_solution_impl(phase, expected_reason);
}}

can_convert_strategy_failure_into_solution! {
    case01_initialize: (FailurePhase::Initialize, "cannot initialize strategy 'failing': cannot initialize"),
    case02_step: (FailurePhase::Step, "step failed"),
    case03_panic: (FailurePhase::Panic, "strategy panicked: strategy is broken"),
}

fn can_convert_strategy_failure_into_solution_impl(phase: FailurePhase, expected_reason: &str) {
    let entry = create_failing_entry("failing", phase);

    let solution = run_strategy(entry, create_config(Duration::from_secs(10), Duration::from_secs(1)))
        .expect("run should not be stuck");

    assert_eq!(get_failure_reason(&solution), expected_reason);
    assert_eq!(solution.cost, NO_SOLUTION_COST);
    assert_eq!(solution.tour, None);
    assert!(!solution.is_feasible());
}

#[test]
fn can_convert_factory_failure_into_solution() {
    let entry = StrategyEntry::new("broken", StrategyKind::Demo, |_| Err("no memory".into()));

    let solution = run_strategy(entry, create_config(Duration::from_secs(10), Duration::from_secs(1)))
        .expect("run should not be stuck");

    assert_eq!(get_failure_reason(&solution), "cannot create strategy 'broken': no memory");
}

#[test]
fn can_stop_run_when_quota_is_reached() {
    let quota = InterruptionQuota::default();
    quota.interrupt();
    let environment = Arc::new(Environment::new(Some(Arc::new(quota)), None, silent_logger()));
    let harness = ExecutionHarness::new(create_config(Duration::from_secs(60), Duration::from_secs(5)), environment);

    let solution = harness
        .run(RunRequest {
            strategy: create_sleepy_entry("sleepy", Duration::from_millis(10)),
            problem: create_square_problem(),
            repetition: 2,
            seed: None,
        })
        .expect("run should not be stuck");

    assert_eq!(solution.status, RunStatus::Terminated);
    assert_eq!(solution.repetition, 2);
    assert!(solution.duration < Duration::from_secs(30));
}
