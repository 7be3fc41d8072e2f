use super::worker::{Worker, WorkerOutcome, WorkerReport};
use super::*;
use crate::evaluation::{BestCost, EvaluationListener, NO_SOLUTION_COST};
use crate::models::{ProblemInstance, RunStatus, Solution};
use crate::strategy::StrategyEntry;
use crate::utils::{Environment, Timer, silent_logger};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError, sync_channel};
use std::thread;
use std::time::Duration;

/// Identifies a single run: one strategy, one problem and one repetition.
#[derive(Clone)]
pub struct RunRequest {
    /// A strategy to run.
    pub strategy: StrategyEntry,
    /// A problem to solve.
    pub problem: Arc<ProblemInstance>,
    /// Repetition index, starting from one.
    pub repetition: usize,
    /// A seed of the run random source.
    pub seed: Option<u64>,
}

/// Runs strategies on isolated workers with cooperative-then-forced cancellation.
pub struct ExecutionHarness {
    config: ExecutionConfig,
    environment: Arc<Environment>,
    listener: Option<Arc<dyn EvaluationListener + Send + Sync>>,
}

pub(super) enum WaitResult {
    Report(WorkerReport),
    Expired,
    Disconnected,
}

impl ExecutionHarness {
    /// Creates a new instance of `ExecutionHarness`.
    pub fn new(config: ExecutionConfig, environment: Arc<Environment>) -> Self {
        Self { config, environment, listener: None }
    }

    /// Sets an evaluation listener shared by evaluators of all runs.
    pub fn with_listener(mut self, listener: Arc<dyn EvaluationListener + Send + Sync>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Runs a single cell. Every failure of the strategy is converted into a solution; only a
    /// worker which cannot be reclaimed is reported as an error.
    pub fn run(&self, request: RunRequest) -> Result<Solution, HarnessError> {
        let timer = Timer::start();
        let cancellation = CancellationToken::default();
        let publisher = BestCost::default();

        let mut state = RunState::Created;
        let mut receiver = None;

        loop {
            state = match state {
                RunState::Created => match self.spawn_worker(&request, &cancellation, &publisher) {
                    Ok(rx) => {
                        receiver = Some(rx);
                        RunState::Running
                    }
                    Err(reason) => return Ok(create_failed(&request, reason, &timer)),
                },
                RunState::Running => match self.wait(receiver.as_ref(), self.config.time_budget, true) {
                    WaitResult::Report(report) => return Ok(create_solution(&request, report, RunState::Completed, &timer)),
                    WaitResult::Disconnected => {
                        return Ok(create_failed(&request, "worker exited without report".to_string(), &timer));
                    }
                    WaitResult::Expired => RunState::TimedOut,
                },
                RunState::TimedOut => {
                    cancellation.cancel();
                    RunState::Cancelling
                }
                RunState::Cancelling => match self.wait(receiver.as_ref(), self.config.grace_period, false) {
                    WaitResult::Report(report) => {
                        return Ok(create_solution(&request, report, RunState::Terminated, &timer));
                    }
                    WaitResult::Disconnected => {
                        return Ok(create_failed(&request, "worker exited without report".to_string(), &timer));
                    }
                    WaitResult::Expired => RunState::Stuck,
                },
                RunState::Stuck => {
                    return Err(HarnessError::Stuck {
                        strategy: request.strategy.name().to_string(),
                        problem: request.problem.name().to_string(),
                        repetition: request.repetition,
                        best_cost: publisher.get(),
                        grace_period: self.config.grace_period,
                    });
                }
                RunState::Completed | RunState::Terminated => unreachable!("terminal state is never looped"),
            };
        }
    }

    fn spawn_worker(
        &self,
        request: &RunRequest,
        cancellation: &CancellationToken,
        publisher: &BestCost,
    ) -> Result<Receiver<WorkerReport>, String> {
        let logger = if self.config.display_strategy_output { self.environment.logger.clone() } else { silent_logger() };

        let worker = Worker {
            entry: request.strategy.clone(),
            problem: request.problem.clone(),
            seed: request.seed,
            cancellation: cancellation.clone(),
            publisher: publisher.clone(),
            listener: self.listener.clone(),
            logger,
            is_output_suppressed: !self.config.display_strategy_output,
        };

        let (sender, receiver) = sync_channel(1);

        // NOTE the handle is dropped on purpose: a finished worker exits right after sending its
        // report, a stuck one cannot be joined anyway
        thread::Builder::new()
            .name(format!("tourney-worker-{}", request.strategy.name()))
            .spawn(move || {
                let report = worker.run();
                let _ = sender.send(report);
            })
            .map(|_| receiver)
            .map_err(|err| format!("cannot spawn worker thread: '{err}'"))
    }

    pub(super) fn wait(
        &self,
        receiver: Option<&Receiver<WorkerReport>>,
        limit: Duration,
        observe_quota: bool,
    ) -> WaitResult {
        let Some(receiver) = receiver else {
            return WaitResult::Disconnected;
        };

        let timer = Timer::start();
        loop {
            let remaining = limit.saturating_sub(timer.elapsed());
            if remaining.is_zero() {
                // NOTE a report sent right at the deadline still counts
                return match receiver.try_recv() {
                    Ok(report) => WaitResult::Report(report),
                    Err(TryRecvError::Disconnected) => WaitResult::Disconnected,
                    Err(TryRecvError::Empty) => WaitResult::Expired,
                };
            }

            match receiver.recv_timeout(remaining.min(self.config.poll_interval)) {
                Ok(report) => return WaitResult::Report(report),
                Err(RecvTimeoutError::Disconnected) => return WaitResult::Disconnected,
                Err(RecvTimeoutError::Timeout) if observe_quota && self.environment.is_quota_reached() => {
                    return WaitResult::Expired;
                }
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
    }
}

fn create_solution(request: &RunRequest, report: WorkerReport, state: RunState, timer: &Timer) -> Solution {
    let status = match (report.outcome, state) {
        (WorkerOutcome::Failed(reason), _) => return create_failed(request, reason, timer),
        (WorkerOutcome::Finished | WorkerOutcome::Cancelled, RunState::Completed) => RunStatus::Completed,
        (WorkerOutcome::Finished | WorkerOutcome::Cancelled, _) => RunStatus::Terminated,
    };

    Solution {
        strategy: request.strategy.name().to_string(),
        problem: request.problem.name().to_string(),
        repetition: request.repetition,
        cost: report.best_cost,
        tour: report.best_tour,
        status,
        duration: timer.elapsed(),
        evaluations: report.evaluations,
    }
}

fn create_failed(request: &RunRequest, reason: String, timer: &Timer) -> Solution {
    Solution {
        strategy: request.strategy.name().to_string(),
        problem: request.problem.name().to_string(),
        repetition: request.repetition,
        cost: NO_SOLUTION_COST,
        tour: None,
        status: RunStatus::Failed { reason },
        duration: timer.elapsed(),
        evaluations: 0,
    }
}
