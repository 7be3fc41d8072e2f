//! Campaign configuration read from a json file.

#[cfg(test)]
#[path = "../../tests/unit/extensions/config_test.rs"]
mod config_test;

use serde::Deserialize;
use std::io::{BufReader, Read};
use std::time::Duration;
use tourney::orchestration::CampaignConfigBuilder;
use tourney::strategy::StrategyRegistry;
use tourney::utils::{Float, GenericError, GenericResult};

/// A campaign configuration. Every value is optional: defaults are used for missing ones.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Specifies campaign shape.
    pub campaign: Option<CampaignSection>,
    /// Specifies limits of a single run.
    pub execution: Option<ExecutionSection>,
    /// Specifies names of strategies to run. All registered strategies are used when missing.
    pub strategies: Option<Vec<String>>,
    /// Specifies logging configuration.
    pub logging: Option<LoggingConfig>,
}

/// Specifies campaign shape.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSection {
    /// Amount of runs per strategy and problem.
    pub repetitions: Option<usize>,
    /// Whether only competitor strategies take part.
    pub competition: Option<bool>,
    /// Maximum amount of concurrent runs.
    pub parallelism: Option<usize>,
    /// A base seed for reproducible runs.
    pub seed: Option<u64>,
}

/// Specifies limits of a single run.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSection {
    /// Time budget in seconds.
    pub time_budget: Option<Float>,
    /// Grace period in seconds.
    pub grace_period: Option<Float>,
    /// Poll interval in milliseconds.
    pub poll_interval: Option<u64>,
    /// Whether strategy output is displayed.
    pub display_strategy_output: Option<bool>,
}

/// Specifies logging configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct LoggingConfig {
    /// Whether campaign progress is logged.
    pub enabled: bool,
}

/// Reads config from json.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<Config> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'").into())
}

/// Creates a campaign config builder with values from the config applied.
pub fn create_builder_from_config(config: &Config) -> GenericResult<CampaignConfigBuilder> {
    let mut builder = CampaignConfigBuilder::default();

    if let Some(campaign) = config.campaign.as_ref() {
        if let Some(repetitions) = campaign.repetitions {
            builder = builder.with_repetitions(repetitions);
        }

        if let Some(competition) = campaign.competition {
            builder = builder.with_competition_only(competition);
        }

        if let Some(parallelism) = campaign.parallelism {
            builder = builder.with_parallelism(parallelism);
        }
    }

    if let Some(execution) = config.execution.as_ref() {
        if let Some(time_budget) = execution.time_budget {
            builder = builder.with_time_budget(parse_secs(time_budget, "time budget")?);
        }

        if let Some(grace_period) = execution.grace_period {
            builder = builder.with_grace_period(parse_secs(grace_period, "grace period")?);
        }

        if let Some(poll_interval) = execution.poll_interval {
            builder = builder.with_poll_interval(Duration::from_millis(poll_interval));
        }

        if let Some(display_strategy_output) = execution.display_strategy_output {
            builder = builder.with_strategy_output(display_strategy_output);
        }
    }

    Ok(builder)
}

/// Creates a registry which contains only strategies with given names, in registry order.
pub fn select_strategies(registry: &StrategyRegistry, names: &[String]) -> GenericResult<StrategyRegistry> {
    if let Some(unknown) = names.iter().find(|name| registry.get(name.as_str()).is_none()) {
        return Err(format!("unknown strategy: '{unknown}'").into());
    }

    registry
        .entries()
        .iter()
        .filter(|entry| names.iter().any(|name| name == entry.name()))
        .try_fold(StrategyRegistry::default(), |registry, entry| registry.with(entry.clone()))
}

/// Converts seconds into duration rejecting negative and non finite values.
pub fn parse_secs(secs: Float, description: &str) -> GenericResult<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|err| GenericError::from(format!("invalid {description}: '{err}'")))
}
