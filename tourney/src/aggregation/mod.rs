//! The aggregation module turns per-run solutions into a cross-problem leaderboard using rank-sum
//! scoring:
//!
//! 1. for each problem, a strategy value is the minimum feasible cost over its repetitions;
//! 2. strategies are ranked within the problem ascending by that value, ties share the same rank;
//!    a strategy without any feasible run gets the worst possible rank (amount of strategies);
//! 3. a strategy score is the sum of its per-problem ranks;
//! 4. the leaderboard is sorted by score, ties are broken by summed raw cost and then by strategy
//!    order.
//!
//! The result depends only on the set of solutions, not on the order they were produced in.

#[cfg(test)]
#[path = "../../tests/unit/aggregation/rank_sum_test.rs"]
mod rank_sum_test;

use crate::evaluation::NO_SOLUTION_COST;
use crate::models::Solution;
use crate::utils::{Float, compare_floats};
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

/// A rank of a strategy within one problem.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRank {
    /// Problem name.
    pub problem: String,
    /// The best feasible cost over all repetitions or infinity (serialized as null).
    #[serde(serialize_with = "serialize_cost")]
    pub best_cost: Float,
    /// Rank within the problem, starting from one.
    pub rank: usize,
}

/// An aggregated score of one strategy.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyScore {
    /// Strategy name.
    pub strategy: String,
    /// Sum of per-problem ranks, lower is better.
    pub score: usize,
    /// Sum of per-problem best costs, used as a tie breaker.
    #[serde(serialize_with = "serialize_cost")]
    pub total_cost: Float,
    /// Per-problem ranks in problem order.
    pub ranks: Vec<ProblemRank>,
}

/// A final campaign ranking.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Strategies ordered from the best to the worst.
    pub leaderboard: Vec<StrategyScore>,
}

impl AggregateResult {
    /// Returns the winner, if there is any strategy.
    pub fn winner(&self) -> Option<&StrategyScore> {
        self.leaderboard.first()
    }

    /// Returns position (starting from one) of the strategy in the leaderboard.
    pub fn position(&self, strategy: &str) -> Option<usize> {
        self.leaderboard.iter().position(|score| score.strategy == strategy).map(|idx| idx + 1)
    }
}

/// Aggregates solutions using rank-sum scoring. Strategies and problems define the order of the
/// output; solutions of unknown strategies or problems are ignored.
pub fn aggregate(strategies: &[String], problems: &[String], solutions: &[Solution]) -> AggregateResult {
    let best_costs = get_best_costs(solutions);

    let mut scores = strategies
        .iter()
        .map(|strategy| StrategyScore { strategy: strategy.clone(), score: 0, total_cost: 0., ranks: vec![] })
        .collect::<Vec<_>>();

    problems.iter().for_each(|problem| {
        let costs = strategies
            .iter()
            .map(|strategy| {
                best_costs.get(&(strategy.as_str(), problem.as_str())).copied().unwrap_or(NO_SOLUTION_COST)
            })
            .collect::<Vec<_>>();

        scores.iter_mut().zip(costs.iter()).for_each(|(score, &cost)| {
            let rank = get_rank(cost, costs.as_slice());

            score.score += rank;
            score.total_cost += cost;
            score.ranks.push(ProblemRank { problem: problem.clone(), best_cost: cost, rank });
        });
    });

    // NOTE stable sort keeps strategy order for complete ties
    scores.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| compare_floats(a.total_cost, b.total_cost)));

    AggregateResult { leaderboard: scores }
}

fn get_best_costs(solutions: &[Solution]) -> FxHashMap<(&str, &str), Float> {
    solutions.iter().filter(|solution| solution.is_feasible()).fold(FxHashMap::default(), |mut acc, solution| {
        acc.entry((solution.strategy.as_str(), solution.problem.as_str()))
            .and_modify(|cost: &mut Float| *cost = cost.min(solution.cost))
            .or_insert(solution.cost);
        acc
    })
}

/// Returns competition rank of the cost: one plus amount of strictly better costs.
fn get_rank(cost: Float, costs: &[Float]) -> usize {
    if !cost.is_finite() {
        return costs.len();
    }

    1 + costs.iter().filter(|&&other| other.is_finite() && other < cost).count()
}

fn serialize_cost<S: Serializer>(cost: &Float, serializer: S) -> Result<S::Ok, S::Error> {
    if cost.is_finite() { serializer.serialize_some(cost) } else { serializer.serialize_none() }
}
