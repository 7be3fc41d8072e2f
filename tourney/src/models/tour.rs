#[cfg(test)]
#[path = "../../tests/unit/models/tour_test.rs"]
mod tour_test;

use crate::utils::Random;
use serde::Serialize;

/// Represents a candidate closed route as a sequence of city indices.
///
/// A feasible tour is a permutation of `0..n`, but the type does not enforce it: strategies are
/// free to build anything and the evaluator decides what is feasible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tour {
    cities: Vec<usize>,
}

impl Tour {
    /// Creates a new instance of `Tour` from given city indices.
    pub fn new(cities: Vec<usize>) -> Self {
        Self { cities }
    }

    /// Creates a tour which visits cities in their natural order.
    pub fn identity(size: usize) -> Self {
        Self { cities: (0..size).collect() }
    }

    /// Creates a tour which visits cities in random order.
    pub fn random(size: usize, random: &dyn Random) -> Self {
        let mut cities = (0..size).collect::<Vec<_>>();
        random.shuffle(cities.as_mut_slice());

        Self { cities }
    }

    /// Returns visited cities.
    pub fn cities(&self) -> &[usize] {
        self.cities.as_slice()
    }

    /// Returns amount of visited cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true if tour has no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Swaps cities at given positions.
    pub fn swap(&mut self, first: usize, second: usize) {
        self.cities.swap(first, second);
    }

    /// Reverses the segment between two positions (both inclusive), which is a classic 2-opt move.
    pub fn reverse_segment(&mut self, start: usize, end: usize) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.cities[start..=end].reverse();
    }

    /// Consumes tour and returns underlying city indices.
    pub fn into_cities(self) -> Vec<usize> {
        self.cities
    }
}

impl From<Vec<usize>> for Tour {
    fn from(cities: Vec<usize>) -> Self {
        Self::new(cities)
    }
}
