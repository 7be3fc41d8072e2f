#[cfg(test)]
#[path = "../tests/unit/random_walk_test.rs"]
mod random_walk_test;

use tourney::prelude::*;

/// Walks randomly through the search space applying one random swap per step.
pub struct RandomWalk {
    tour: Tour,
    best: Option<Tour>,
}

impl RandomWalk {
    /// Creates a new instance of `RandomWalk` starting from the identity tour.
    pub fn new(size: usize) -> Self {
        Self { tour: Tour::identity(size), best: None }
    }
}

impl Strategy for RandomWalk {
    fn initialize(&mut self, ctx: &mut SearchContext) -> GenericResult<()> {
        if self.tour.len() != ctx.problem().len() {
            return Err(format!("tour size {} does not match problem size {}", self.tour.len(), ctx.problem().len()).into());
        }

        ctx.evaluate(&self.tour);
        self.best = Some(self.tour.clone());

        Ok(())
    }

    fn step(&mut self, ctx: &mut SearchContext) -> GenericResult<StepStatus> {
        let last = self.tour.len() as i32 - 1;
        let (first, second) = (ctx.random().uniform_int(0, last), ctx.random().uniform_int(0, last));
        self.tour.swap(first as usize, second as usize);

        let best_cost = ctx.best_cost();
        if ctx.evaluate(&self.tour) < best_cost {
            self.best = Some(self.tour.clone());
        }

        Ok(StepStatus::Continue)
    }

    fn current_best(&self) -> Option<Tour> {
        self.best.clone()
    }
}
