#[cfg(test)]
#[path = "../../tests/unit/commands/run_test.rs"]
mod run_test;

use super::*;

use clap::{Arg, ArgAction, Command};
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tourney::orchestration::Campaign;
use tourney::utils::{Environment, InfoLogger, Quota, silent_logger};
use tourney_cli::extensions::config::{create_builder_from_config, parse_secs, read_config, select_strategies};
use tourney_cli::extensions::formats::read_problem_file;
use tourney_cli::extensions::reporting::*;
use tourney_strategies::create_default_registry;

const PROBLEM_ARG_NAME: &str = "PROBLEM";
const CONFIG_ARG_NAME: &str = "config";
const REPETITIONS_ARG_NAME: &str = "repetitions";
const TIME_BUDGET_ARG_NAME: &str = "time-budget";
const GRACE_PERIOD_ARG_NAME: &str = "grace-period";
const PARALLELISM_ARG_NAME: &str = "parallelism";
const COMPETITION_ARG_NAME: &str = "competition";
const STRATEGY_ARG_NAME: &str = "strategy";
const STRATEGY_OUTPUT_ARG_NAME: &str = "strategy-output";
const RANDOM_SEED_ARG_NAME: &str = "seed";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const LOG_ARG_NAME: &str = "log";
const LIST_ARG_NAME: &str = "list-strategies";

pub fn get_run_app() -> Command {
    Command::new("tourney")
        .about("Runs TSP strategies on given problems under a wall-clock budget and ranks them")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(PROBLEM_ARG_NAME)
                .help("Sets problem files to use: TSPLIB95 (EUC_2D) or plain 'x y' per line")
                .num_args(1..)
                .required_unless_present(LIST_ARG_NAME)
                .index(1),
        )
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to campaign configuration file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(REPETITIONS_ARG_NAME)
                .help("Specifies amount of runs per strategy and problem")
                .short('r')
                .long(REPETITIONS_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(TIME_BUDGET_ARG_NAME)
                .help("Specifies time budget of a single run in seconds")
                .short('t')
                .long(TIME_BUDGET_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(GRACE_PERIOD_ARG_NAME)
                .help("Specifies how long to wait in seconds for a cancelled run before aborting the campaign")
                .long(GRACE_PERIOD_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(PARALLELISM_ARG_NAME)
                .help("Specifies maximum amount of concurrent runs")
                .short('p')
                .long(PARALLELISM_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(COMPETITION_ARG_NAME)
                .help("Specifies whether only competitor strategies take part")
                .long(COMPETITION_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(STRATEGY_ARG_NAME)
                .help("Specifies strategy to run, can be used multiple times")
                .short('s')
                .long(STRATEGY_ARG_NAME)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new(STRATEGY_OUTPUT_ARG_NAME)
                .help("Specifies whether messages logged by strategies are displayed")
                .long(STRATEGY_OUTPUT_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(RANDOM_SEED_ARG_NAME)
                .help("Specifies randomization seed to make runs reproducible")
                .long(RANDOM_SEED_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for json report output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether campaign lifecycle and run starts are logged")
                .long(LOG_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(LIST_ARG_NAME)
                .help("Lists available strategies and exits")
                .long(LIST_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
}

/// Runs a campaign with the default strategy registry.
pub fn run_campaign(
    matches: &ArgMatches,
    quota: Option<Arc<dyn Quota + Send + Sync>>,
    out_writer_func: fn(Option<File>) -> BufWriter<Box<dyn Write>>,
) -> Result<(), CommandError> {
    let registry = create_default_registry()?;

    if matches.get_flag(LIST_ARG_NAME) {
        println!("{}", get_strategies_list(&registry));
        return Ok(());
    }

    let config = matches
        .get_one::<String>(CONFIG_ARG_NAME)
        .map(|path| open_file(path, "config").and_then(|file| read_config(BufReader::new(file))))
        .transpose()?
        .unwrap_or_default();

    let mut builder = create_builder_from_config(&config)?;

    if let Some(repetitions) = parse_int_value::<usize>(matches, REPETITIONS_ARG_NAME, "repetitions")? {
        builder = builder.with_repetitions(repetitions);
    }

    if let Some(time_budget) = parse_float_value::<f64>(matches, TIME_BUDGET_ARG_NAME, "time budget")? {
        builder = builder.with_time_budget(parse_secs(time_budget, "time budget")?);
    }

    if let Some(grace_period) = parse_float_value::<f64>(matches, GRACE_PERIOD_ARG_NAME, "grace period")? {
        builder = builder.with_grace_period(parse_secs(grace_period, "grace period")?);
    }

    if let Some(parallelism) = parse_int_value::<usize>(matches, PARALLELISM_ARG_NAME, "parallelism")? {
        builder = builder.with_parallelism(parallelism);
    }

    if matches.get_flag(COMPETITION_ARG_NAME) {
        builder = builder.with_competition_only(true);
    }

    if matches.get_flag(STRATEGY_OUTPUT_ARG_NAME) {
        builder = builder.with_strategy_output(true);
    }

    let campaign_config = builder.build()?;

    let seed = parse_int_value::<u64>(matches, RANDOM_SEED_ARG_NAME, "seed")?
        .or_else(|| config.campaign.as_ref().and_then(|campaign| campaign.seed));

    let registry = match matches
        .get_many::<String>(STRATEGY_ARG_NAME)
        .map(|names| names.cloned().collect::<Vec<_>>())
        .or_else(|| config.strategies.clone())
    {
        Some(names) => select_strategies(&registry, names.as_slice())?,
        None => registry,
    };

    let problems = matches
        .get_many::<String>(PROBLEM_ARG_NAME)
        .map(|paths| paths.map(|path| read_problem_file(Path::new(path)).map(Arc::new)).collect::<Result<Vec<_>, _>>())
        .transpose()?
        .unwrap_or_default();

    let out_result = matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result")).transpose()?;

    let is_logging_enabled = matches.get_flag(LOG_ARG_NAME) || config.logging.as_ref().is_some_and(|logging| logging.enabled);
    let console_logger: InfoLogger = Arc::new(|msg: &str| println!("{msg}"));
    let logger = if is_logging_enabled { console_logger.clone() } else { silent_logger() };

    let environment = Arc::new(Environment::new(quota, seed, logger));
    let report = Campaign::new(campaign_config, &registry, problems, environment)?
        .with_listener(Arc::new(ProgressReporter::new(console_logger, is_logging_enabled)))
        .run()?;

    println!("{}", get_leaderboard_table(&report));

    if let Some(out_result) = out_result {
        write_report_json(&report, out_writer_func(Some(out_result)))?;
    }

    Ok(())
}
