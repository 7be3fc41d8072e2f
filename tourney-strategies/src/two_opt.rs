#[cfg(test)]
#[path = "../tests/unit/two_opt_test.rs"]
mod two_opt_test;

use crate::greedy::create_nearest_neighbour_tour;
use tourney::prelude::*;

const IMPROVEMENT_THRESHOLD: Float = 1E-9;

/// A 2-opt local search started from a nearest neighbour tour. Every step scans the moves of one
/// edge; the search finishes when a full pass over all edges gives no improvement.
#[derive(Default)]
pub struct TwoOpt {
    tour: Tour,
    edge: usize,
    improved: bool,
}

impl Strategy for TwoOpt {
    fn initialize(&mut self, ctx: &mut SearchContext) -> GenericResult<()> {
        let start = ctx.random().uniform_int(0, ctx.problem().len() as i32 - 1) as usize;

        self.tour = create_nearest_neighbour_tour(ctx.problem(), start);
        self.edge = 0;
        self.improved = false;

        ctx.evaluate(&self.tour);

        Ok(())
    }

    fn step(&mut self, ctx: &mut SearchContext) -> GenericResult<StepStatus> {
        let size = self.tour.len();
        if size < 4 {
            return Ok(StepStatus::Finished);
        }

        let first = self.edge;
        let best_move = (first + 2..size)
            .filter(|&second| !(first == 0 && second == size - 1))
            .map(|second| (second, get_two_opt_delta(ctx.problem(), &self.tour, first, second)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b));

        if let Some((second, delta)) = best_move.filter(|(_, delta)| *delta < -IMPROVEMENT_THRESHOLD) {
            self.tour.reverse_segment(first + 1, second);
            self.improved = true;
            ctx.evaluate(&self.tour);
        }

        self.edge += 1;
        if self.edge + 2 >= size {
            if !self.improved {
                return Ok(StepStatus::Finished);
            }

            self.edge = 0;
            self.improved = false;
        }

        Ok(StepStatus::Continue)
    }

    fn current_best(&self) -> Option<Tour> {
        (!self.tour.is_empty()).then(|| self.tour.clone())
    }
}

/// Returns cost change of replacing edges `(first, first + 1)` and `(second, second + 1)` with
/// `(first, second)` and `(first + 1, second + 1)`, which is the same as reversing the segment
/// between `first + 1` and `second`.
pub(crate) fn get_two_opt_delta(problem: &ProblemInstance, tour: &Tour, first: usize, second: usize) -> Float {
    let cities = tour.cities();
    let size = cities.len();

    let (a, b) = (cities[first], cities[(first + 1) % size]);
    let (c, d) = (cities[second], cities[(second + 1) % size]);

    problem.distance(a, c) + problem.distance(b, d) - problem.distance(a, b) - problem.distance(c, d)
}
