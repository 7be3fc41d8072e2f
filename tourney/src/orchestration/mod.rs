//! The orchestration module runs a campaign: every selected strategy against every problem for a
//! number of repetitions, followed by the aggregation of results.

mod campaign;
pub use self::campaign::*;

mod config;
pub use self::config::*;

use crate::execution::HarnessError;
use crate::models::Solution;
use std::fmt::{Display, Formatter};

/// Receives campaign progress notifications. Called from control threads, possibly concurrently
/// when cells run in parallel.
pub trait CampaignListener {
    /// Called before a run is started.
    fn on_run_started(&self, _strategy: &str, _problem: &str, _repetition: usize) {}

    /// Called once a run produced its solution.
    fn on_solution(&self, _solution: &Solution) {}
}

/// A listener which ignores everything.
pub struct NoopCampaignListener;

impl CampaignListener for NoopCampaignListener {}

/// An error which aborts the whole campaign.
#[derive(Clone, Debug)]
pub enum CampaignError {
    /// A worker could not be reclaimed after cancellation.
    Stuck(HarnessError),
    /// Campaign was interrupted by an external quota.
    Interrupted,
    /// There are no strategies to run.
    NoStrategies,
    /// There are no problems to solve.
    NoProblems,
    /// Configuration is invalid.
    InvalidConfig(String),
}

impl Display for CampaignError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignError::Stuck(err) => write!(f, "cannot reclaim worker, campaign is aborted: {err}"),
            CampaignError::Interrupted => write!(f, "campaign is interrupted"),
            CampaignError::NoStrategies => write!(f, "no strategies selected"),
            CampaignError::NoProblems => write!(f, "no problems to solve"),
            CampaignError::InvalidConfig(msg) => write!(f, "invalid campaign configuration: {msg}"),
        }
    }
}

impl std::error::Error for CampaignError {}

impl From<HarnessError> for CampaignError {
    fn from(err: HarnessError) -> Self {
        CampaignError::Stuck(err)
    }
}
