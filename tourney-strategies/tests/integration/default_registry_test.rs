use super::*;
use crate::helpers::create_circle_problem;
use std::sync::Arc;
use std::time::Duration;
use tourney::prelude::*;
use tourney::utils::silent_logger;

#[test]
fn can_create_default_registry() {
    let registry = create_default_registry().expect("cannot create registry");

    let names = registry.entries().iter().map(|entry| entry.name()).collect::<Vec<_>>();
    let competitors = registry.competitors().iter().map(|entry| entry.name().to_string()).collect::<Vec<_>>();

    assert_eq!(names, vec!["random-walk", "greedy", "hill-climbing", "two-opt", "simulated-annealing"]);
    assert_eq!(competitors, vec!["two-opt".to_string(), "simulated-annealing".to_string()]);
    assert!(registry.entries().iter().all(|entry| !entry.authors().is_empty()));
}

#[test]
fn can_run_campaign_with_all_strategies() {
    let registry = create_default_registry().expect("cannot create registry");
    let config = CampaignConfigBuilder::default()
        .with_repetitions(1)
        .with_time_budget(Duration::from_millis(300))
        .with_grace_period(Duration::from_secs(5))
        .with_poll_interval(Duration::from_millis(10))
        .build()
        .expect("cannot build config");
    let problems = vec![create_circle_problem(30, Some(17)), create_circle_problem(5, Some(19))];
    let environment = Arc::new(Environment::new(None, Some(42), silent_logger()));

    let report = Campaign::new(config, &registry, problems, environment)
        .and_then(|campaign| campaign.run())
        .expect("campaign should succeed");

    assert_eq!(report.solutions.solutions().len(), 10);
    assert!(report.solutions.solutions().iter().all(|solution| solution.is_feasible()));
    assert!(report.solutions.solutions().iter().all(|solution| !matches!(solution.status, RunStatus::Failed { .. })));
    assert_eq!(report.aggregate.leaderboard.len(), 5);
}
