#[cfg(test)]
#[path = "../../tests/unit/models/coordinate_test.rs"]
mod coordinate_test;

use crate::utils::Float;
use serde::Serialize;

/// Represents an immutable point on a plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinate {
    x: Float,
    y: Float,
}

impl Coordinate {
    /// Creates a new instance of `Coordinate`.
    pub fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    /// Returns x component.
    pub fn x(&self) -> Float {
        self.x
    }

    /// Returns y component.
    pub fn y(&self) -> Float {
        self.y
    }

    /// Returns euclidean distance to other coordinate.
    pub fn distance(&self, other: &Coordinate) -> Float {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(Float, Float)> for Coordinate {
    fn from((x, y): (Float, Float)) -> Self {
        Self::new(x, y)
    }
}
