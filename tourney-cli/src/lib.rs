//! A command line interface library which loads problems, configures a campaign and reports its
//! results.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub(crate) mod helpers;

#[cfg(test)]
#[path = "../tests/features/campaign_test.rs"]
mod campaign_test;

pub use tourney as core;

pub mod extensions;
