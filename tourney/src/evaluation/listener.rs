use crate::models::Tour;
use crate::utils::Float;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Receives notifications about evaluations, e.g. to drive a live visualization. Called on the
/// worker thread of the run, so implementations should be cheap.
pub trait EvaluationListener {
    /// Called after every evaluation with evaluated cost and the best known cost.
    fn on_evaluation(&self, _cost: Float, _best_cost: Float) {}

    /// Called every time a new best feasible tour is accepted.
    fn on_best_improved(&self, _tour: &Tour, _cost: Float) {}
}

/// A listener which ignores everything.
pub struct NoopEvaluationListener;

impl EvaluationListener for NoopEvaluationListener {}

/// A shared cell with the best cost published by a single evaluator. It can be read from another
/// thread while the run is still in progress (or stuck).
#[derive(Clone, Debug)]
pub struct BestCost {
    bits: Arc<AtomicU64>,
}

impl BestCost {
    /// Returns last published cost or infinity if nothing was published.
    pub fn get(&self) -> Float {
        Float::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub(crate) fn publish(&self, cost: Float) {
        self.bits.store(cost.to_bits(), Ordering::Release);
    }
}

impl Default for BestCost {
    fn default() -> Self {
        Self { bits: Arc::new(AtomicU64::new(Float::INFINITY.to_bits())) }
    }
}
