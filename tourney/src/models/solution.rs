use crate::models::Tour;
use crate::utils::Float;
use serde::Serialize;
use std::time::Duration;

/// Specifies how a run ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RunStatus {
    /// Strategy finished on its own within the time budget.
    Completed,
    /// Time budget expired and the strategy stopped within the grace period.
    Terminated,
    /// Strategy could not be created or initialized, or it failed during search.
    Failed {
        /// Failure description.
        reason: String,
    },
}

/// An immutable result of one run, produced exactly once per strategy, problem and repetition.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// Strategy name.
    pub strategy: String,
    /// Problem name.
    pub problem: String,
    /// Repetition index, starting from one.
    pub repetition: usize,
    /// Best feasible cost or infinity when nothing feasible was found (serialized as null).
    pub cost: Float,
    /// Best feasible tour, if any.
    pub tour: Option<Tour>,
    /// How the run ended.
    pub status: RunStatus,
    /// Wall-clock duration of the run.
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Amount of evaluations made by the strategy.
    pub evaluations: usize,
}

impl Solution {
    /// Returns true if a feasible tour was found.
    pub fn is_feasible(&self) -> bool {
        self.cost.is_finite()
    }

    /// Returns best cost if a feasible tour was found.
    pub fn best_cost(&self) -> Option<Float> {
        self.is_feasible().then_some(self.cost)
    }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
