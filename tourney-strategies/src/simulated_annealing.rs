#[cfg(test)]
#[path = "../tests/unit/simulated_annealing_test.rs"]
mod simulated_annealing_test;

use crate::greedy::create_nearest_neighbour_tour;
use crate::two_opt::get_two_opt_delta;
use tourney::prelude::*;

const MOVES_PER_STEP: usize = 128;
const COOLING_RATE: Float = 0.997;
const MIN_TEMPERATURE_RATIO: Float = 1E-4;

/// A simulated annealing over 2-opt moves. A worse move is accepted with probability
/// `exp(-delta / temperature)`; the temperature is decreased geometrically after every step and
/// the search is restarted from the best tour once the system is frozen.
#[derive(Default)]
pub struct SimulatedAnnealing {
    current: Tour,
    best: Option<Tour>,
    initial_temperature: Float,
    temperature: Float,
}

impl Strategy for SimulatedAnnealing {
    fn initialize(&mut self, ctx: &mut SearchContext) -> GenericResult<()> {
        let problem = ctx.problem().clone();

        self.current = create_nearest_neighbour_tour(&problem, 0);
        self.best = Some(self.current.clone());
        let cost = ctx.evaluate(&self.current);

        // start from average edge length of the initial tour
        self.initial_temperature = if cost.is_finite() && cost > 0. { cost / problem.len() as Float } else { 1. };
        self.temperature = self.initial_temperature;

        ctx.log(format!("simulated annealing: initial temperature is {:.3}", self.initial_temperature).as_str());

        Ok(())
    }

    fn step(&mut self, ctx: &mut SearchContext) -> GenericResult<StepStatus> {
        let size = self.current.len();
        if size < 4 {
            return Ok(StepStatus::Finished);
        }

        let problem = ctx.problem().clone();
        let last = size as i32 - 1;

        for _ in 0..MOVES_PER_STEP {
            let (a, b) = (ctx.random().uniform_int(0, last) as usize, ctx.random().uniform_int(0, last) as usize);
            let (first, second) = if a < b { (a, b) } else { (b, a) };

            if second < first + 2 || (first == 0 && second == size - 1) {
                continue;
            }

            let delta = get_two_opt_delta(&problem, &self.current, first, second);
            if delta < 0. || ctx.random().is_hit((-delta / self.temperature).exp()) {
                self.current.reverse_segment(first + 1, second);
            }
        }

        let best_cost = ctx.best_cost();
        if ctx.evaluate(&self.current) < best_cost {
            self.best = Some(self.current.clone());
        }

        self.temperature *= COOLING_RATE;
        if self.temperature < self.initial_temperature * MIN_TEMPERATURE_RATIO {
            if let Some(best) = self.best.as_ref() {
                self.current = best.clone();
            }
            self.temperature = self.initial_temperature;
            ctx.log("simulated annealing: reheating");
        }

        Ok(StepStatus::Continue)
    }

    fn current_best(&self) -> Option<Tour> {
        self.best.clone()
    }
}
