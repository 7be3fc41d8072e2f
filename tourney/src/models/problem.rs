#[cfg(test)]
#[path = "../../tests/unit/models/problem_test.rs"]
mod problem_test;

use crate::models::Coordinate;
use crate::utils::{Float, GenericResult};

/// Defines a single routing problem: an ordered list of cities which has to be visited exactly
/// once by a closed tour. Once created, it is shared read-only by all runs.
#[derive(Debug)]
pub struct ProblemInstance {
    name: String,
    coordinates: Vec<Coordinate>,
}

impl ProblemInstance {
    /// Creates a new instance of `ProblemInstance`. Fails when there are no cities or some city has
    /// non finite coordinate.
    pub fn new(name: impl Into<String>, coordinates: Vec<Coordinate>) -> GenericResult<Self> {
        let name = name.into();

        if coordinates.is_empty() {
            return Err(format!("problem '{name}' has no cities").into());
        }

        if let Some(index) = coordinates.iter().position(|c| !c.x().is_finite() || !c.y().is_finite()) {
            return Err(format!("problem '{name}' has non finite coordinate at index {index}").into());
        }

        Ok(Self { name, coordinates })
    }

    /// Returns problem name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns amount of cities.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Always false as problem has at least one city.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Returns city coordinate at given index, if it exists.
    pub fn coordinate(&self, index: usize) -> Option<&Coordinate> {
        self.coordinates.get(index)
    }

    /// Returns all coordinates.
    pub fn coordinates(&self) -> &[Coordinate] {
        self.coordinates.as_slice()
    }

    /// Returns distance between two cities. Unknown cities are infinitely far.
    pub fn distance(&self, from: usize, to: usize) -> Float {
        match (self.coordinates.get(from), self.coordinates.get(to)) {
            (Some(from), Some(to)) => from.distance(to),
            _ => Float::INFINITY,
        }
    }
}
