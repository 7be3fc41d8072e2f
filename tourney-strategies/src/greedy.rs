#[cfg(test)]
#[path = "../tests/unit/greedy_test.rs"]
mod greedy_test;

use tourney::prelude::*;
use tourney::utils::compare_floats;

/// Builds a nearest neighbour tour from a new start city on every step. It finishes once every
/// city was tried as a start.
#[derive(Default)]
pub struct Greedy {
    starts: Vec<usize>,
    best: Option<(Tour, Float)>,
}

impl Strategy for Greedy {
    fn initialize(&mut self, ctx: &mut SearchContext) -> GenericResult<()> {
        self.starts = Tour::random(ctx.problem().len(), ctx.random()).into_cities();

        Ok(())
    }

    fn step(&mut self, ctx: &mut SearchContext) -> GenericResult<StepStatus> {
        let Some(start) = self.starts.pop() else {
            return Ok(StepStatus::Finished);
        };

        let tour = create_nearest_neighbour_tour(ctx.problem(), start);
        let cost = ctx.evaluate(&tour);

        if self.best.as_ref().is_none_or(|(_, best_cost)| cost < *best_cost) {
            self.best = Some((tour, cost));
        }

        Ok(if self.starts.is_empty() { StepStatus::Finished } else { StepStatus::Continue })
    }

    fn current_best(&self) -> Option<Tour> {
        self.best.as_ref().map(|(tour, _)| tour.clone())
    }
}

/// Creates a tour which always moves to the closest unvisited city.
pub(crate) fn create_nearest_neighbour_tour(problem: &ProblemInstance, start: usize) -> Tour {
    let size = problem.len();
    let mut visited = vec![false; size];
    let mut cities = Vec::with_capacity(size);

    let mut current = start;
    visited[current] = true;
    cities.push(current);

    while cities.len() < size {
        let next = (0..size)
            .filter(|&city| !visited[city])
            .min_by(|&a, &b| compare_floats(problem.distance(current, a), problem.distance(current, b)));

        let Some(next) = next else { break };

        visited[next] = true;
        cities.push(next);
        current = next;
    }

    Tour::new(cities)
}
