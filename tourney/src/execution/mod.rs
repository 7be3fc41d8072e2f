//! The execution module runs one strategy against one problem on a dedicated worker thread
//! within a bounded wall-clock budget.
//!
//! A run goes through the following states:
//!
//! ```text
//! Created -> Running -> Completed
//!                    -> TimedOut -> Cancelling -> Terminated
//!                                              -> Stuck
//! ```
//!
//! Cancellation is cooperative: the worker checks the token between strategy steps. A worker which
//! does not stop within the grace period cannot be reclaimed and is reported as [`HarnessError::Stuck`].

#[cfg(test)]
#[path = "../../tests/unit/execution/harness_test.rs"]
mod harness_test;

mod cancellation;
pub use self::cancellation::CancellationToken;

mod harness;
pub use self::harness::*;

mod worker;

use crate::utils::Float;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// A default time budget of a single run.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(60);

/// A default time given to a worker to stop after cancellation.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(60);

/// A default interval between checks of an external quota while waiting for a worker.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Specifies execution limits of a single run.
#[derive(Clone, Debug)]
pub struct ExecutionConfig {
    /// Wall-clock budget of a run (strategy construction and initialization included).
    pub time_budget: Duration,
    /// How long to wait for a cancelled worker before declaring it stuck.
    pub grace_period: Duration,
    /// How often an external quota is checked while waiting for a worker.
    pub poll_interval: Duration,
    /// Whether messages logged by strategies are forwarded to the environment logger.
    pub display_strategy_output: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
            grace_period: DEFAULT_GRACE_PERIOD,
            poll_interval: DEFAULT_POLL_INTERVAL,
            display_strategy_output: false,
        }
    }
}

/// A state of a single run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Evaluator and strategy are being constructed.
    Created,
    /// Worker is searching within the time budget.
    Running,
    /// Worker finished on its own before the budget expired.
    Completed,
    /// Budget expired (or external quota was reached), cancellation is about to be sent.
    TimedOut,
    /// Cancellation was sent, waiting for the worker within the grace period.
    Cancelling,
    /// Worker observed cancellation and stopped.
    Terminated,
    /// Worker ignored cancellation: it cannot be reclaimed.
    Stuck,
}

/// An error which cannot be contained within a single run.
#[derive(Clone, Debug)]
pub enum HarnessError {
    /// A worker did not stop within the grace period after cancellation.
    Stuck {
        /// Strategy name.
        strategy: String,
        /// Problem name.
        problem: String,
        /// Repetition index.
        repetition: usize,
        /// The best cost published by the worker before it got stuck.
        best_cost: Float,
        /// How long the harness waited after cancellation.
        grace_period: Duration,
    },
}

impl Display for HarnessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Stuck { strategy, problem, repetition, best_cost, grace_period } => write!(
                f,
                "strategy '{strategy}' on '{problem}' (run {repetition}) did not stop within {}s after \
                 cancellation, best known cost: {best_cost}",
                grace_period.as_secs_f64()
            ),
        }
    }
}

impl std::error::Error for HarnessError {}
