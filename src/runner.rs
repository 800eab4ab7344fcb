//! Unit runner and batch driver.
//!
//! One *unit* is a (year, week) pair: load the season table, aggregate the
//! week, write the boxscore. Units are independent — the batch driver
//! records a failed unit and keeps going, with no retry. A season whose
//! input file cannot be loaded fails once at year scope rather than once
//! per week.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::config::{self, Config};
use crate::error::BoxscoreError;
use crate::io;
use crate::weekly;

/// A completed (year, week) unit.
#[derive(Debug, Clone)]
pub struct UnitOutcome {
    pub year: u16,
    pub week: u8,
    /// Number of (game, team) rows in the boxscore.
    pub groups: usize,
    pub output: PathBuf,
}

/// A failed unit. `week` is `None` for year-scoped failures (the season
/// file itself was unavailable).
#[derive(Debug)]
pub struct UnitFailure {
    pub year: u16,
    pub week: Option<u8>,
    pub error: BoxscoreError,
}

/// Everything a batch run produced.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub completed: Vec<UnitOutcome>,
    pub failed: Vec<UnitFailure>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run a single (year, week) unit: load → aggregate → write.
///
/// `output` overrides the configured output path when given.
pub fn run_week(
    config: &Config,
    year: u16,
    week: u8,
    output: Option<PathBuf>,
) -> Result<UnitOutcome, BoxscoreError> {
    config::validate_week(year, week)?;

    let table = io::read_table(&config.input_path(year))?;
    let boxscore = weekly::week_boxscore(&table, week)?;
    let output = output.unwrap_or_else(|| config.output_path(year, week));
    io::write_table(&boxscore, &output)?;

    let outcome = UnitOutcome {
        year,
        week,
        groups: boxscore.row_count(),
        output,
    };
    info!(
        year,
        week,
        groups = outcome.groups,
        output = %outcome.output.display(),
        "boxscore written"
    );
    Ok(outcome)
}

/// Run every (year, week) unit in the given ranges.
///
/// The requested week range is clamped to each season's calendar, so a
/// batch over weeks 1–18 quietly produces 17 files for pre-2021 seasons.
/// Each season table is loaded once and shared immutably by its weeks.
pub fn run_batch(
    config: &Config,
    years: RangeInclusive<u16>,
    weeks: Option<RangeInclusive<u8>>,
) -> BatchReport {
    let mut report = BatchReport::default();

    for year in years {
        let last = config::weeks_in_season(year);
        let (first_week, last_week) = match &weeks {
            Some(range) => (*range.start(), (*range.end()).min(last)),
            None => (1, last),
        };
        if first_week == 0 || first_week > last_week {
            warn!(year, "no weeks to process for this season");
            continue;
        }

        info!(year, path = %config.input_path(year).display(), "loading season");
        let table = match io::read_table(&config.input_path(year)) {
            Ok(table) => table,
            Err(e) => {
                error!(year, kind = %e.kind(), error = %e, "season unavailable");
                report.failed.push(UnitFailure {
                    year,
                    week: None,
                    error: e,
                });
                continue;
            }
        };

        for week in first_week..=last_week {
            let result = weekly::week_boxscore(&table, week).and_then(|boxscore| {
                let output = config.output_path(year, week);
                io::write_table(&boxscore, &output)?;
                Ok(UnitOutcome {
                    year,
                    week,
                    groups: boxscore.row_count(),
                    output,
                })
            });
            match result {
                Ok(outcome) => {
                    info!(year, week, groups = outcome.groups, "boxscore written");
                    report.completed.push(outcome);
                }
                Err(e) => {
                    error!(year, week, kind = %e.kind(), error = %e, "unit failed");
                    report.failed.push(UnitFailure {
                        year,
                        week: Some(week),
                        error: e,
                    });
                }
            }
        }
    }

    info!(
        completed = report.completed.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    report
}
