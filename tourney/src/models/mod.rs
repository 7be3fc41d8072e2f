//! The models module contains the routing problem data model: coordinates, problem instances
//! and tours.

mod coordinate;
pub use self::coordinate::Coordinate;

mod problem;
pub use self::problem::ProblemInstance;

mod tour;
pub use self::tour::Tour;

mod solution;
pub use self::solution::{RunStatus, Solution};
