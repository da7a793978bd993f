mod data;
mod grid;
mod model;
mod report;
mod rules;
mod solver;
mod validate;

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use crate::data::{SchedulingInput, SolveOutcome};

#[derive(Debug, Parser)]
#[clap(name = "shift_scheduler", version, about = "Monthly worker shift timetabling on HiGHS")]
struct Args {
    /// JSON scheduling config; the built-in sample month when absent
    #[clap(value_parser)]
    config: Option<PathBuf>,
    /// Print the result as JSON instead of the text report
    #[clap(long, action)]
    json: bool,
}

/// Failure to obtain a [`SchedulingInput`] from disk.
#[derive(Debug)]
enum ConfigError {
    Read(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, e) => write!(f, "cannot read {}: {}", path.display(), e),
            ConfigError::Parse(path, e) => write!(f, "invalid config {}: {}", path.display(), e),
        }
    }
}

impl std::error::Error for ConfigError {}

fn load_input(path: &Path) -> Result<SchedulingInput, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    serde_json::from_str(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let input = match args.config {
        Some(path) => match load_input(&path) {
            Ok(input) => input,
            Err(e) => {
                error!("{}", e);
                return ExitCode::from(1);
            }
        },
        None => {
            info!("No config given, solving the built-in sample month.");
            SchedulingInput::sample()
        }
    };

    let outcome = match solver::solve(&input) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(1);
        }
    };

    info!("Finished with status {}", outcome.status());
    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("cannot serialize result: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        print!("{}", report::render_text(&outcome));
    }

    match outcome {
        SolveOutcome::Scheduled(_) => ExitCode::SUCCESS,
        SolveOutcome::NoSolution { .. } => ExitCode::from(2),
    }
}
