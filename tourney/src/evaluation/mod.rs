//! The evaluation module computes tour costs, decides tour feasibility and keeps track of the
//! best feasible tour found during a single run.

#[cfg(test)]
#[path = "../../tests/unit/evaluation/evaluator_test.rs"]
mod evaluator_test;

mod listener;
pub use self::listener::*;

use crate::execution::CancellationToken;
use crate::models::{ProblemInstance, Tour};
use crate::utils::Float;
use std::sync::Arc;

/// A cost value reported when no feasible tour was found. It is greater than any finite tour cost.
pub const NO_SOLUTION_COST: Float = Float::INFINITY;

/// Evaluates tours of one problem instance and tracks the best feasible cost of one run.
///
/// The best cost is monotonically non-increasing and is updated only from a valid permutation
/// which was evaluated before the run was cancelled. Malformed tours are never an error: they
/// are simply never better.
pub struct Evaluator {
    problem: Arc<ProblemInstance>,
    best_cost: Float,
    best_tour: Option<Tour>,
    evaluations: usize,
    cancellation: CancellationToken,
    publisher: BestCost,
    listener: Arc<dyn EvaluationListener + Send + Sync>,
}

impl Evaluator {
    /// Creates a new instance of `Evaluator` which is never cancelled and reports to nobody.
    pub fn new(problem: Arc<ProblemInstance>) -> Self {
        Self {
            problem,
            best_cost: NO_SOLUTION_COST,
            best_tour: None,
            evaluations: 0,
            cancellation: CancellationToken::default(),
            publisher: BestCost::default(),
            listener: Arc::new(NoopEvaluationListener),
        }
    }

    /// Binds evaluator to the run cancellation token: no improvement is accepted once it is cancelled.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Sets a cell where every improvement of the best cost is published.
    pub fn with_publisher(mut self, publisher: BestCost) -> Self {
        self.publisher = publisher;
        self
    }

    /// Sets an evaluation listener.
    pub fn with_listener(mut self, listener: Arc<dyn EvaluationListener + Send + Sync>) -> Self {
        self.listener = listener;
        self
    }

    /// Evaluates a tour and returns its closed length. When the tour is a valid permutation, is
    /// cheaper than the best known one and the run is not cancelled yet, it becomes the new best.
    pub fn evaluate(&mut self, tour: &Tour) -> Float {
        let cost = self.compute_cost(tour);
        self.evaluations += 1;

        if cost < self.best_cost && self.is_valid(tour) && !self.cancellation.is_cancelled() {
            self.best_cost = cost;
            self.best_tour = Some(tour.clone());
            self.publisher.publish(cost);
            self.listener.on_best_improved(tour, cost);
        }

        self.listener.on_evaluation(cost, self.best_cost);

        cost
    }

    /// Evaluates a tour without validating it and without updating the best known cost. Use it for
    /// search step comparisons when tour validity is guaranteed by construction.
    pub fn quick_evaluate(&self, tour: &Tour) -> Float {
        let cost = self.compute_cost(tour);
        self.listener.on_evaluation(cost, self.best_cost);

        cost
    }

    /// Checks whether tour visits every city of the problem exactly once.
    pub fn is_valid(&self, tour: &Tour) -> bool {
        let size = self.problem.len();
        if tour.len() != size {
            return false;
        }

        let mut visited = vec![false; size];
        tour.cities().iter().all(|&city| city < size && !std::mem::replace(&mut visited[city], true))
    }

    /// Returns the best feasible cost found so far or [`NO_SOLUTION_COST`].
    pub fn best_cost(&self) -> Float {
        self.best_cost
    }

    /// Returns the best feasible tour found so far.
    pub fn best_tour(&self) -> Option<&Tour> {
        self.best_tour.as_ref()
    }

    /// Returns amount of `evaluate` calls.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Returns evaluated problem.
    pub fn problem(&self) -> &Arc<ProblemInstance> {
        &self.problem
    }

    /// Returns true if the run this evaluator belongs to is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    fn compute_cost(&self, tour: &Tour) -> Float {
        let cities = tour.cities();

        match (cities.first(), cities.last()) {
            (Some(&first), Some(&last)) => {
                cities.windows(2).map(|leg| self.problem.distance(leg[0], leg[1])).sum::<Float>()
                    + self.problem.distance(last, first)
            }
            _ => NO_SOLUTION_COST,
        }
    }
}
