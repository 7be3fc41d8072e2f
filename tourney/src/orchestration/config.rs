#[cfg(test)]
#[path = "../../tests/unit/orchestration/config_test.rs"]
mod config_test;

use super::CampaignError;
use crate::execution::ExecutionConfig;
use std::time::Duration;

/// A default amount of repetitions per strategy and problem.
pub const DEFAULT_REPETITIONS: usize = 2;

/// A campaign configuration.
#[derive(Clone, Debug)]
pub struct CampaignConfig {
    /// Amount of runs per strategy and problem.
    pub repetitions: usize,
    /// Limits of every run.
    pub execution: ExecutionConfig,
    /// Whether only competitor strategies take part.
    pub competition_only: bool,
    /// Maximum amount of runs executed at the same time.
    pub parallelism: usize,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            execution: ExecutionConfig::default(),
            competition_only: false,
            parallelism: 1,
        }
    }
}

/// Provides configurable way to build campaign configuration using fluent interface style.
#[derive(Default)]
pub struct CampaignConfigBuilder {
    config: CampaignConfig,
}

impl CampaignConfigBuilder {
    /// Sets amount of repetitions. Default is 2.
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.config.repetitions = repetitions;
        self
    }

    /// Sets wall-clock budget of every run. Default is 60s.
    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.config.execution.time_budget = time_budget;
        self
    }

    /// Sets grace period for cancelled runs. Default is 60s.
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.config.execution.grace_period = grace_period;
        self
    }

    /// Sets interval of external quota checks. Default is 50ms.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.config.execution.poll_interval = poll_interval;
        self
    }

    /// Sets whether strategy output is displayed. Default is false.
    pub fn with_strategy_output(mut self, display_strategy_output: bool) -> Self {
        self.config.execution.display_strategy_output = display_strategy_output;
        self
    }

    /// Sets whether only competitors take part. Default is false.
    pub fn with_competition_only(mut self, competition_only: bool) -> Self {
        self.config.competition_only = competition_only;
        self
    }

    /// Sets maximum amount of concurrent runs. Default is 1.
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.config.parallelism = parallelism;
        self
    }

    /// Validates and builds the configuration.
    pub fn build(self) -> Result<CampaignConfig, CampaignError> {
        let config = self.config;

        if config.repetitions == 0 {
            return Err(CampaignError::InvalidConfig("repetitions must be positive".to_string()));
        }

        if config.parallelism == 0 {
            return Err(CampaignError::InvalidConfig("parallelism must be positive".to_string()));
        }

        if config.execution.time_budget.is_zero() {
            return Err(CampaignError::InvalidConfig("time budget must be positive".to_string()));
        }

        if config.execution.grace_period.is_zero() {
            return Err(CampaignError::InvalidConfig("grace period must be positive".to_string()));
        }

        if config.execution.poll_interval.is_zero() {
            return Err(CampaignError::InvalidConfig("poll interval must be positive".to_string()));
        }

        Ok(config)
    }
}
