//! This module reimports commonly used types.

pub use crate::aggregation::{AggregateResult, StrategyScore, aggregate};

pub use crate::evaluation::{EvaluationListener, Evaluator, NO_SOLUTION_COST};

pub use crate::execution::{CancellationToken, ExecutionConfig, ExecutionHarness, HarnessError, RunRequest};

pub use crate::models::{Coordinate, ProblemInstance, RunStatus, Solution, Tour};

pub use crate::orchestration::{
    Campaign, CampaignConfig, CampaignConfigBuilder, CampaignError, CampaignListener, CampaignReport,
};

pub use crate::strategy::{
    SearchContext, StepStatus, Strategy, StrategyConfig, StrategyEntry, StrategyKind, StrategyRegistry,
};

pub use crate::utils::{Environment, Float, GenericError, GenericResult, InfoLogger, Random};
