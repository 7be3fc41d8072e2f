pub mod run;

use clap::ArgMatches;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::str::FromStr;
use tourney::orchestration::CampaignError;
use tourney::utils::GenericError;

/// An exit code used when a worker could not be reclaimed.
pub const STUCK_EXIT_CODE: i32 = 2;

/// An exit code used when the campaign is interrupted.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// A command failure with the process exit code it maps to.
#[derive(Debug)]
pub struct CommandError {
    pub message: String,
    pub code: i32,
}

impl From<GenericError> for CommandError {
    fn from(err: GenericError) -> Self {
        Self { message: err.to_string(), code: 1 }
    }
}

impl From<CampaignError> for CommandError {
    fn from(err: CampaignError) -> Self {
        let code = match &err {
            CampaignError::Stuck(_) => STUCK_EXIT_CODE,
            CampaignError::Interrupted => INTERRUPTED_EXIT_CODE,
            _ => 1,
        };

        Self { message: err.to_string(), code }
    }
}

pub(crate) fn create_write_buffer(out_file: Option<File>) -> BufWriter<Box<dyn Write>> {
    if let Some(out_file) = out_file {
        BufWriter::new(Box::new(out_file))
    } else {
        BufWriter::new(Box::new(stdout()))
    }
}

fn open_file(path: &str, description: &str) -> Result<File, GenericError> {
    File::open(path).map_err(|err| format!("cannot open {description} file '{path}': '{err}'").into())
}

fn create_file(path: &str, description: &str) -> Result<File, GenericError> {
    File::create(path).map_err(|err| format!("cannot create {description} file '{path}': '{err}'").into())
}

fn parse_float_value<T: FromStr<Err = std::num::ParseFloatError>>(
    matches: &ArgMatches,
    arg_name: &str,
    arg_desc: &str,
) -> Result<Option<T>, GenericError> {
    matches
        .get_one::<String>(arg_name)
        .map(|arg| {
            arg.parse::<T>()
                .map_err(|err| GenericError::from(format!("cannot get float value, error: '{err}': '{arg_desc}'")))
                .map(Some)
        })
        .unwrap_or(Ok(None))
}

fn parse_int_value<T: FromStr<Err = std::num::ParseIntError>>(
    matches: &ArgMatches,
    arg_name: &str,
    arg_desc: &str,
) -> Result<Option<T>, GenericError> {
    matches
        .get_one::<String>(arg_name)
        .map(|arg| {
            arg.parse::<T>()
                .map_err(|err| GenericError::from(format!("cannot get integer value, error: '{err}': '{arg_desc}'")))
                .map(Some)
        })
        .unwrap_or(Ok(None))
}
