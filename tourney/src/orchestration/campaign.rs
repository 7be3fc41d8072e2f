#[cfg(test)]
#[path = "../../tests/unit/orchestration/campaign_test.rs"]
mod campaign_test;

use super::*;
use crate::aggregation::{AggregateResult, aggregate};
use crate::evaluation::EvaluationListener;
use crate::execution::{ExecutionHarness, RunRequest};
use crate::models::ProblemInstance;
use crate::strategy::{StrategyEntry, StrategyRegistry};
use crate::utils::{Environment, ThreadPool, Timer, parallel_into_collect};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Keeps solutions of all runs ordered by strategy, problem and repetition.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionMatrix {
    strategies: Vec<String>,
    problems: Vec<String>,
    repetitions: usize,
    solutions: Vec<Solution>,
}

impl SolutionMatrix {
    /// Returns strategy names in campaign order.
    pub fn strategies(&self) -> &[String] {
        self.strategies.as_slice()
    }

    /// Returns problem names in campaign order.
    pub fn problems(&self) -> &[String] {
        self.problems.as_slice()
    }

    /// Returns amount of repetitions.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Returns solution of the given cell, repetition index starts from one.
    pub fn get(&self, strategy: usize, problem: usize, repetition: usize) -> Option<&Solution> {
        if strategy >= self.strategies.len() || problem >= self.problems.len() {
            return None;
        }

        if repetition == 0 || repetition > self.repetitions {
            return None;
        }

        let index = (strategy * self.problems.len() + problem) * self.repetitions + repetition - 1;

        self.solutions.get(index)
    }

    /// Returns all solutions.
    pub fn solutions(&self) -> &[Solution] {
        self.solutions.as_slice()
    }
}

/// A result of the whole campaign.
#[derive(Clone, Debug, Serialize)]
pub struct CampaignReport {
    /// Solutions of every run.
    pub solutions: SolutionMatrix,
    /// Final ranking.
    pub aggregate: AggregateResult,
}

#[derive(Clone, Copy)]
struct Cell {
    strategy: usize,
    problem: usize,
    repetition: usize,
}

/// Runs every selected strategy on every problem a configured amount of times.
pub struct Campaign {
    config: CampaignConfig,
    strategies: Vec<StrategyEntry>,
    problems: Vec<Arc<ProblemInstance>>,
    environment: Arc<Environment>,
    listener: Arc<dyn CampaignListener + Send + Sync>,
    evaluation_listener: Option<Arc<dyn EvaluationListener + Send + Sync>>,
}

impl Campaign {
    /// Creates a new instance of `Campaign`.
    pub fn new(
        config: CampaignConfig,
        registry: &StrategyRegistry,
        problems: Vec<Arc<ProblemInstance>>,
        environment: Arc<Environment>,
    ) -> Result<Self, CampaignError> {
        let strategies = registry.select(config.competition_only);

        if strategies.is_empty() {
            return Err(CampaignError::NoStrategies);
        }

        if problems.is_empty() {
            return Err(CampaignError::NoProblems);
        }

        let mut names = FxHashSet::default();
        if let Some(problem) = problems.iter().find(|problem| !names.insert(problem.name())) {
            return Err(CampaignError::InvalidConfig(format!("duplicate problem name: '{}'", problem.name())));
        }

        Ok(Self {
            config,
            strategies,
            problems,
            environment,
            listener: Arc::new(NoopCampaignListener),
            evaluation_listener: None,
        })
    }

    /// Sets campaign progress listener.
    pub fn with_listener(mut self, listener: Arc<dyn CampaignListener + Send + Sync>) -> Self {
        self.listener = listener;
        self
    }

    /// Sets evaluation listener shared by evaluators of all runs.
    pub fn with_evaluation_listener(mut self, listener: Arc<dyn EvaluationListener + Send + Sync>) -> Self {
        self.evaluation_listener = Some(listener);
        self
    }

    /// Runs all cells and aggregates their solutions. Fails if a worker cannot be reclaimed or the
    /// campaign is interrupted: no aggregation is done in this case.
    pub fn run(&self) -> Result<CampaignReport, CampaignError> {
        let timer = Timer::start();
        self.log(
            format!(
                "campaign started: {} strategies, {} problems, {} repetitions, {}s per run",
                self.strategies.len(),
                self.problems.len(),
                self.config.repetitions,
                self.config.execution.time_budget.as_secs_f64()
            )
            .as_str(),
        );

        let harness = self.create_harness();
        let aborted = AtomicBool::new(false);
        let cells = self.get_cells();

        let results = if self.config.parallelism > 1 {
            let pool = ThreadPool::new(self.config.parallelism).map_err(CampaignError::InvalidConfig)?;
            pool.execute(|| parallel_into_collect(cells, |cell| self.run_cell(&harness, cell, &aborted, &timer)))
        } else {
            cells.into_iter().map(|cell| self.run_cell(&harness, cell, &aborted, &timer)).collect::<Vec<_>>()
        };

        let solutions = self.collect_solutions(results)?;

        let strategies = self.strategies.iter().map(|entry| entry.name().to_string()).collect::<Vec<_>>();
        let problems = self.problems.iter().map(|problem| problem.name().to_string()).collect::<Vec<_>>();
        let aggregate = aggregate(strategies.as_slice(), problems.as_slice(), solutions.as_slice());

        self.log(
            format!(
                "campaign finished in {}s, winner: '{}'",
                timer.elapsed_secs(),
                aggregate.winner().map_or("none", |score| score.strategy.as_str())
            )
            .as_str(),
        );

        Ok(CampaignReport {
            solutions: SolutionMatrix { strategies, problems, repetitions: self.config.repetitions, solutions },
            aggregate,
        })
    }

    fn create_harness(&self) -> ExecutionHarness {
        let harness = ExecutionHarness::new(self.config.execution.clone(), self.environment.clone());

        match self.evaluation_listener.clone() {
            Some(listener) => harness.with_listener(listener),
            None => harness,
        }
    }

    fn get_cells(&self) -> Vec<Cell> {
        (0..self.strategies.len())
            .flat_map(|strategy| {
                (0..self.problems.len()).flat_map(move |problem| {
                    (1..=self.config.repetitions).map(move |repetition| Cell { strategy, problem, repetition })
                })
            })
            .collect()
    }

    /// Runs a single cell unless the campaign is already aborted.
    fn run_cell(
        &self,
        harness: &ExecutionHarness,
        cell: Cell,
        aborted: &AtomicBool,
        timer: &Timer,
    ) -> Option<Result<Solution, CampaignError>> {
        if aborted.load(Ordering::Acquire) {
            return None;
        }

        if self.environment.is_quota_reached() {
            aborted.store(true, Ordering::Release);
            return None;
        }

        let strategy = &self.strategies[cell.strategy];
        let problem = &self.problems[cell.problem];

        self.listener.on_run_started(strategy.name(), problem.name(), cell.repetition);

        let seed = self.environment.run_seed(&[cell.strategy as u64, cell.problem as u64, cell.repetition as u64]);
        let request =
            RunRequest { strategy: strategy.clone(), problem: problem.clone(), repetition: cell.repetition, seed };

        match harness.run(request) {
            Ok(solution) => {
                self.log(
                    format!(
                        "[{}s] strategy '{}' on '{}' ({}/{}): {}",
                        timer.elapsed_secs(),
                        solution.strategy,
                        solution.problem,
                        solution.repetition,
                        self.config.repetitions,
                        solution.best_cost().map_or_else(|| "no feasible tour".to_string(), |cost| format!("{cost:.2}"))
                    )
                    .as_str(),
                );
                self.listener.on_solution(&solution);
                Some(Ok(solution))
            }
            Err(err) => {
                aborted.store(true, Ordering::Release);
                self.log(format!("{err}").as_str());
                Some(Err(err.into()))
            }
        }
    }

    fn collect_solutions(
        &self,
        results: Vec<Option<Result<Solution, CampaignError>>>,
    ) -> Result<Vec<Solution>, CampaignError> {
        let total = results.len();
        let solutions = results.into_iter().flatten().collect::<Result<Vec<_>, _>>()?;

        if solutions.len() != total || self.environment.is_quota_reached() {
            return Err(CampaignError::Interrupted);
        }

        Ok(solutions)
    }

    fn log(&self, message: &str) {
        (self.environment.logger)(message)
    }
}
