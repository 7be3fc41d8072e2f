//! This crate exposes an execution and evaluation harness which benchmarks interchangeable
//! travelling salesman strategies under a hard wall-clock budget and ranks them.
//!
//! The main building blocks are:
//! - [`evaluation::Evaluator`]: computes tour costs and tracks the best feasible tour of one run;
//! - [`strategy::Strategy`]: a contract implemented by competing algorithms;
//! - [`execution::ExecutionHarness`]: runs one strategy on a dedicated worker with
//!   cooperative-then-forced cancellation;
//! - [`orchestration::Campaign`]: runs every strategy on every problem several times;
//! - [`aggregation::aggregate`]: ranks strategies using rank-sum scoring.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod aggregation;
pub mod evaluation;
pub mod execution;
pub mod models;
pub mod orchestration;
pub mod prelude;
pub mod strategy;
pub mod utils;
