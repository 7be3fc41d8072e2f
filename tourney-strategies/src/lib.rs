//! This crate contains reference strategies which compete in the tourney harness.
//!
//! # Strategies
//!
//! - **random-walk**: applies random swaps without any acceptance criteria
//! - **greedy**: builds nearest neighbour tours from every start city
//! - **hill-climbing**: keeps a random swap only if it improves the tour
//! - **two-opt**: improves a nearest neighbour tour with 2-opt moves until local optimum
//! - **simulated-annealing**: applies 2-opt moves accepted by Metropolis criterion with reheating

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub(crate) mod helpers;

#[cfg(test)]
#[path = "../tests/integration/default_registry_test.rs"]
mod default_registry_test;

pub use tourney as core;

mod greedy;
pub use self::greedy::Greedy;

mod hill_climbing;
pub use self::hill_climbing::HillClimbing;

mod random_walk;
pub use self::random_walk::RandomWalk;

mod simulated_annealing;
pub use self::simulated_annealing::SimulatedAnnealing;

mod two_opt;
pub use self::two_opt::TwoOpt;

use tourney::strategy::{StrategyEntry, StrategyKind, StrategyRegistry};
use tourney::utils::GenericResult;

const AUTHORS: &[&str] = &["tourney contributors"];

/// Creates a registry with all reference strategies: demo ones first, then competitors.
pub fn create_default_registry() -> GenericResult<StrategyRegistry> {
    StrategyRegistry::default()
        .with(
            StrategyEntry::new("random-walk", StrategyKind::Demo, |config| {
                Ok(Box::new(RandomWalk::new(config.problem.len())))
            })
            .with_authors(AUTHORS),
        )?
        .with(StrategyEntry::new("greedy", StrategyKind::Demo, |_| Ok(Box::new(Greedy::default()))).with_authors(AUTHORS))?
        .with(
            StrategyEntry::new("hill-climbing", StrategyKind::Demo, |config| {
                Ok(Box::new(HillClimbing::new(config.problem.len())))
            })
            .with_authors(AUTHORS),
        )?
        .with(StrategyEntry::new("two-opt", StrategyKind::Competitor, |_| Ok(Box::new(TwoOpt::default()))).with_authors(AUTHORS))?
        .with(
            StrategyEntry::new("simulated-annealing", StrategyKind::Competitor, |_| {
                Ok(Box::new(SimulatedAnnealing::default()))
            })
            .with_authors(AUTHORS),
        )
}
