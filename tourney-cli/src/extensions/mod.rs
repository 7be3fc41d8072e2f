//! Contains extensions used by the command line interface.

pub mod config;
pub mod formats;
pub mod interruption;
pub mod reporting;
