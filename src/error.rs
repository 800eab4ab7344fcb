//! Error types for the boxscore pipeline.
//!
//! All failures are represented by [`BoxscoreError`] and propagated via
//! `Result<T, BoxscoreError>` up to the unit boundary (one year/week run).
//! The batch driver records a failed unit and moves on; nothing is retried.
//!
//! # Error Classification
//!
//! Errors fall into four categories, reported by [`BoxscoreError::kind`]:
//! - **Config** — bad CLI/TOML input, invalid week ranges, malformed plans.
//! - **Schema** — a referenced column is absent from the loaded table.
//!   Detected before any aggregation work; no output is written.
//! - **Source** — the season file is missing, unreadable, or not valid CSV.
//! - **Internal** — bugs.
//!
//! An empty filtered result is *not* an error: a week with no plays still
//! produces a header-only output file.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Pipeline stage at which a column reference is resolved.
///
/// Carried inside [`BoxscoreError::MissingColumn`] so the message names the
/// part of the plan that referenced the absent column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Filter,
    Derive,
    Group,
    Aggregate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Filter => write!(f, "filter"),
            Stage::Derive => write!(f, "derive"),
            Stage::Group => write!(f, "group"),
            Stage::Aggregate => write!(f, "aggregate"),
        }
    }
}

/// Primary error type for the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum BoxscoreError {
    // ── Config errors — reject before touching any data ──────────────────
    /// The TOML config file could not be read or parsed.
    #[error("config file {}: {message}", .path.display())]
    ConfigFile { path: PathBuf, message: String },

    /// An invalid value was supplied on the CLI or in the config file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Schema errors — abort the unit before any output is written ──────
    /// A column referenced by the plan is absent from the table schema.
    #[error("column not found: {column} (referenced by the {stage} stage)")]
    MissingColumn { column: String, stage: Stage },

    /// The table declares the same column name twice.
    #[error("duplicate column: {column}")]
    DuplicateColumn { column: String },

    /// A row does not match the table's column count.
    #[error("row has {got} fields, table has {expected} columns")]
    RowArity { expected: usize, got: usize },

    // ── Source errors — fatal for this unit, other units unaffected ──────
    /// The season input file does not exist or cannot be opened.
    #[error("source table unavailable: {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// CSV-level failure while reading or writing a table.
    #[error("csv error on {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Non-CSV I/O failure (temp file creation, flush, rename).
    #[error("i/o error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ── Internal errors — should not happen ──────────────────────────────
    /// An unexpected internal error. Indicates a bug.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Classification of error severity/kind for logging and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Schema,
    Source,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Config => write!(f, "CONFIG"),
            ErrorKind::Schema => write!(f, "SCHEMA"),
            ErrorKind::Source => write!(f, "SOURCE"),
            ErrorKind::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl BoxscoreError {
    /// Classify the error for logging and batch reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoxscoreError::ConfigFile { .. } | BoxscoreError::InvalidConfig(_) => ErrorKind::Config,

            BoxscoreError::MissingColumn { .. }
            | BoxscoreError::DuplicateColumn { .. }
            | BoxscoreError::RowArity { .. } => ErrorKind::Schema,

            BoxscoreError::SourceUnavailable { .. }
            | BoxscoreError::Csv { .. }
            | BoxscoreError::Io { .. } => ErrorKind::Source,

            BoxscoreError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether a batch run should skip the remaining weeks of the same
    /// season. Source errors are year-scoped (the season file itself is
    /// the problem); everything else is scoped to a single (year, week).
    pub fn is_year_scoped(&self) -> bool {
        matches!(self, BoxscoreError::SourceUnavailable { .. })
    }
}
