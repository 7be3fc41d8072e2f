//! Campaign progress and result reporting.

#[cfg(test)]
#[path = "../../tests/unit/extensions/reporting_test.rs"]
mod reporting_test;

use std::io::{BufWriter, Write};
use tourney::models::{RunStatus, Solution};
use tourney::orchestration::{CampaignListener, CampaignReport};
use tourney::strategy::StrategyRegistry;
use tourney::utils::{GenericResult, InfoLogger};

/// Reports every solution as soon as its run is over. Run starts are reported in verbose mode only.
pub struct ProgressReporter {
    logger: InfoLogger,
    is_verbose: bool,
}

impl ProgressReporter {
    /// Creates a new instance of `ProgressReporter`.
    pub fn new(logger: InfoLogger, is_verbose: bool) -> Self {
        Self { logger, is_verbose }
    }
}

impl CampaignListener for ProgressReporter {
    fn on_run_started(&self, strategy: &str, problem: &str, repetition: usize) {
        if self.is_verbose {
            (self.logger)(format!("running strategy '{strategy}' on '{problem}' (run {repetition})").as_str());
        }
    }

    fn on_solution(&self, solution: &Solution) {
        (self.logger)(get_solution_line(solution).as_str());
    }
}

/// Returns a one line summary of the solution.
pub fn get_solution_line(solution: &Solution) -> String {
    let cost = solution.best_cost().map_or_else(|| "no feasible tour".to_string(), |cost| format!("{cost:.2}"));
    let status = match &solution.status {
        RunStatus::Completed => "completed".to_string(),
        RunStatus::Terminated => "terminated".to_string(),
        RunStatus::Failed { reason } => format!("failed: {reason}"),
    };

    format!(
        "strategy '{}' on '{}' (run {}): {cost}, {status}",
        solution.strategy, solution.problem, solution.repetition
    )
}

/// Returns a leaderboard as a human readable table.
pub fn get_leaderboard_table(report: &CampaignReport) -> String {
    let header = format!("{:>4}  {:<24} {:>6} {:>16}", "#", "strategy", "score", "total cost");

    let rows = report.aggregate.leaderboard.iter().enumerate().map(|(idx, score)| {
        let total_cost = if score.total_cost.is_finite() { format!("{:.2}", score.total_cost) } else { "-".to_string() };
        format!("{:>4}  {:<24} {:>6} {:>16}", idx + 1, score.strategy, score.score, total_cost)
    });

    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}

/// Returns registered strategies as a human readable list.
pub fn get_strategies_list(registry: &StrategyRegistry) -> String {
    registry
        .entries()
        .iter()
        .map(|entry| format!("{} ({:?}) by {}", entry.name(), entry.kind(), entry.authors().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes campaign report as json.
pub fn write_report_json<W: Write>(report: &CampaignReport, mut writer: BufWriter<W>) -> GenericResult<()> {
    serde_json::to_writer_pretty(&mut writer, report).map_err(|err| format!("cannot write report: '{err}'"))?;
    writer.flush()?;

    Ok(())
}
