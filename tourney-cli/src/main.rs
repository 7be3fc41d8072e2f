//! A command line interface to run TSP strategy campaigns.

mod commands;

use commands::run::{get_run_app, run_campaign};
use std::process;
use tourney_cli::extensions::interruption::create_interruption_quota;

fn main() {
    let matches = get_run_app().get_matches();

    let quota = create_interruption_quota().unwrap_or_else(|err| {
        eprintln!("{err}");
        process::exit(1);
    });

    if let Err(err) = run_campaign(&matches, Some(quota), commands::create_write_buffer) {
        eprintln!("{}", err.message);
        process::exit(err.code);
    }
}
