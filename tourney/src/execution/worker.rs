use super::CancellationToken;
use crate::evaluation::{BestCost, EvaluationListener, Evaluator};
use crate::models::{ProblemInstance, Tour};
use crate::strategy::{SearchContext, StepStatus, StrategyConfig, StrategyEntry};
use crate::utils::{DefaultRandom, Float, GenericResult, InfoLogger};
use std::any::Any;
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Once};

thread_local! {
    static IS_PANIC_OUTPUT_SUPPRESSED: Cell<bool> = const { Cell::new(false) };
}

static PANIC_HOOK: Once = Once::new();

/// Specifies why the worker stopped.
pub(crate) enum WorkerOutcome {
    /// Strategy reported that it is finished.
    Finished,
    /// Cancellation was observed between steps.
    Cancelled,
    /// Strategy failed: construction, initialization or search error, or panic.
    Failed(String),
}

/// A one-shot message sent by the worker to the control thread.
pub(crate) struct WorkerReport {
    pub outcome: WorkerOutcome,
    pub best_cost: Float,
    pub best_tour: Option<Tour>,
    pub evaluations: usize,
}

/// Everything the worker thread needs to build and drive one strategy instance.
pub(crate) struct Worker {
    pub entry: StrategyEntry,
    pub problem: Arc<ProblemInstance>,
    pub seed: Option<u64>,
    pub cancellation: CancellationToken,
    pub publisher: BestCost,
    pub listener: Option<Arc<dyn EvaluationListener + Send + Sync>>,
    pub logger: InfoLogger,
    pub is_output_suppressed: bool,
}

impl Worker {
    pub fn run(self) -> WorkerReport {
        install_panic_hook();
        IS_PANIC_OUTPUT_SUPPRESSED.with(|flag| flag.set(self.is_output_suppressed));

        let mut evaluator = Evaluator::new(self.problem.clone())
            .with_cancellation(self.cancellation.clone())
            .with_publisher(self.publisher.clone());
        if let Some(listener) = self.listener.clone() {
            evaluator = evaluator.with_listener(listener);
        }

        let random = Box::new(self.seed.map_or_else(DefaultRandom::default, DefaultRandom::new_repeatable));
        let mut ctx = SearchContext::new(evaluator, random, self.logger.clone(), self.cancellation.clone());

        let outcome = match catch_unwind(AssertUnwindSafe(|| self.search(&mut ctx))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => WorkerOutcome::Failed(err.to_string()),
            Err(payload) => WorkerOutcome::Failed(format!("strategy panicked: {}", panic_message(payload.as_ref()))),
        };

        let evaluator = ctx.into_evaluator();

        WorkerReport {
            outcome,
            best_cost: evaluator.best_cost(),
            best_tour: evaluator.best_tour().cloned(),
            evaluations: evaluator.evaluations(),
        }
    }

    fn search(&self, ctx: &mut SearchContext) -> GenericResult<WorkerOutcome> {
        let config = StrategyConfig { problem: self.problem.clone(), seed: self.seed };

        let mut strategy =
            self.entry.create(&config).map_err(|err| format!("cannot create strategy '{}': {err}", self.entry.name()))?;

        strategy.initialize(ctx).map_err(|err| format!("cannot initialize strategy '{}': {err}", self.entry.name()))?;

        let outcome = loop {
            if ctx.is_cancelled() {
                break WorkerOutcome::Cancelled;
            }

            if strategy.step(ctx)? == StepStatus::Finished {
                break WorkerOutcome::Finished;
            }
        };

        // NOTE the evaluator ignores it when the run is already cancelled
        if let Some(tour) = strategy.current_best() {
            ctx.evaluate(&tour);
        }

        Ok(outcome)
    }
}

/// Installs a process wide panic hook which keeps silent on threads with suppressed output and
/// delegates to the previous hook otherwise.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if !is_panic_output_suppressed() {
                default_hook(info);
            }
        }));
    });
}

/// Returns true if panic messages of the current thread are not printed.
pub(crate) fn is_panic_output_suppressed() -> bool {
    IS_PANIC_OUTPUT_SUPPRESSED.with(Cell::get)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|msg| msg.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
