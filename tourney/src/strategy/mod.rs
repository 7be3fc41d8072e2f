//! The strategy module defines the contract every competing algorithm implements and the context
//! it works with during a single run.

mod registry;
pub use self::registry::*;

use crate::evaluation::Evaluator;
use crate::execution::CancellationToken;
use crate::models::{ProblemInstance, Tour};
use crate::utils::{Float, GenericResult, InfoLogger, Random};
use std::sync::Arc;

/// Specifies whether the strategy wants to be called again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// More steps are welcome.
    Continue,
    /// Strategy has nothing more to do.
    Finished,
}

/// An interchangeable optimization algorithm.
///
/// The harness calls `initialize` exactly once and then `step` repeatedly until the time budget
/// expires or the strategy reports [`StepStatus::Finished`]. Every step must return promptly:
/// cancellation is checked only between steps, so a step which never returns cannot be reclaimed
/// and aborts the whole campaign.
pub trait Strategy {
    /// Prepares the strategy for search.
    fn initialize(&mut self, ctx: &mut SearchContext) -> GenericResult<()>;

    /// Makes a bounded amount of search progress.
    fn step(&mut self, ctx: &mut SearchContext) -> GenericResult<StepStatus>;

    /// Returns the best tour the strategy currently knows about.
    fn current_best(&self) -> Option<Tour>;
}

/// Keeps everything a strategy can use during one run. It owns the run's evaluator.
pub struct SearchContext {
    evaluator: Evaluator,
    random: Box<dyn Random>,
    logger: InfoLogger,
    cancellation: CancellationToken,
}

impl SearchContext {
    /// Creates a new instance of `SearchContext`.
    pub fn new(
        evaluator: Evaluator,
        random: Box<dyn Random>,
        logger: InfoLogger,
        cancellation: CancellationToken,
    ) -> Self {
        Self { evaluator, random, logger, cancellation }
    }

    /// Returns the problem being solved.
    pub fn problem(&self) -> &Arc<ProblemInstance> {
        self.evaluator.problem()
    }

    /// Evaluates tour and tracks it as best candidate. See [`Evaluator::evaluate`].
    pub fn evaluate(&mut self, tour: &Tour) -> Float {
        self.evaluator.evaluate(tour)
    }

    /// Evaluates tour without any validation. See [`Evaluator::quick_evaluate`].
    pub fn quick_evaluate(&self, tour: &Tour) -> Float {
        self.evaluator.quick_evaluate(tour)
    }

    /// Returns the best feasible cost found so far in this run.
    pub fn best_cost(&self) -> Float {
        self.evaluator.best_cost()
    }

    /// Returns the run's evaluator.
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Returns the run's random source.
    pub fn random(&self) -> &dyn Random {
        self.random.as_ref()
    }

    /// Returns true when the run was asked to stop. Long running steps should check it and return.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Writes a message to the run's log.
    pub fn log(&self, message: &str) {
        (self.logger)(message)
    }

    pub(crate) fn into_evaluator(self) -> Evaluator {
        self.evaluator
    }
}
