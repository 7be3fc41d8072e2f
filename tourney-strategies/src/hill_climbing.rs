#[cfg(test)]
#[path = "../tests/unit/hill_climbing_test.rs"]
mod hill_climbing_test;

use tourney::prelude::*;

/// A random-swap hill climbing: a neighbour replaces the current tour only if it is better.
pub struct HillClimbing {
    tour: Tour,
}

impl HillClimbing {
    /// Creates a new instance of `HillClimbing` starting from the identity tour.
    pub fn new(size: usize) -> Self {
        Self { tour: Tour::identity(size) }
    }
}

impl Strategy for HillClimbing {
    fn initialize(&mut self, ctx: &mut SearchContext) -> GenericResult<()> {
        if self.tour.len() != ctx.problem().len() {
            return Err(format!("tour size {} does not match problem size {}", self.tour.len(), ctx.problem().len()).into());
        }

        ctx.evaluate(&self.tour);

        Ok(())
    }

    fn step(&mut self, ctx: &mut SearchContext) -> GenericResult<StepStatus> {
        let last = self.tour.len() as i32 - 1;
        let (first, second) = (ctx.random().uniform_int(0, last), ctx.random().uniform_int(0, last));

        let mut candidate = self.tour.clone();
        candidate.swap(first as usize, second as usize);

        let best_cost = ctx.best_cost();
        if ctx.evaluate(&candidate) < best_cost {
            self.tour = candidate;
        }

        Ok(StepStatus::Continue)
    }

    fn current_best(&self) -> Option<Tour> {
        Some(self.tour.clone())
    }
}
