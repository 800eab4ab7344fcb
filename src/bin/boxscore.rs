//! boxscore CLI — produce weekly team boxscores from play-by-play exports.
//!
//! `run` handles a single (year, week) unit; `batch` walks a year range and
//! writes one file per (year, week), clamping weeks to each season's
//! calendar. Logging goes through `tracing`; set `RUST_LOG` to adjust
//! verbosity.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use boxscore::config::Config;
use boxscore::runner;

#[derive(Parser)]
#[command(
    name = "boxscore",
    version,
    about = "Aggregate play-by-play CSV exports into weekly team boxscores"
)]
struct Cli {
    /// TOML config file with the directory layout.
    #[arg(long, env = "BOXSCORE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Directory containing nfl_pbp_<year>.csv season exports.
    #[arg(long, env = "BOXSCORE_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Directory receiving nfl_boxscore_<year>_<week>.csv outputs.
    #[arg(long, env = "BOXSCORE_OUTPUT_DIR", global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Produce the boxscore for a single (year, week) unit.
    Run {
        #[arg(long)]
        year: u16,
        #[arg(long)]
        week: u8,
        /// Write to this path instead of the configured layout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Produce boxscores for every week of a year range.
    Batch {
        #[arg(long)]
        start_year: u16,
        #[arg(long)]
        end_year: u16,
        /// First week to produce (default 1).
        #[arg(long)]
        start_week: Option<u8>,
        /// Last week to produce (default: full season calendar).
        #[arg(long)]
        end_week: Option<u8>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "cannot load config");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    match cli.command {
        Command::Run { year, week, output } => {
            match runner::run_week(&config, year, week, output) {
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(year, week, kind = %e.kind(), error = %e, "unit failed");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Batch {
            start_year,
            end_year,
            start_week,
            end_week,
        } => {
            if start_year > end_year {
                error!(start_year, end_year, "empty year range");
                return ExitCode::FAILURE;
            }
            let weeks = match (start_week, end_week) {
                (None, None) => None,
                (first, last) => Some(first.unwrap_or(1)..=last.unwrap_or(18)),
            };
            let report = runner::run_batch(&config, start_year..=end_year, weeks);
            if report.all_succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
