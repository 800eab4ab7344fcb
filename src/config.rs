//! Run configuration and the season calendar.
//!
//! Data directory, output directory, and file name layout are explicit
//! configuration, not constants. A [`Config`] comes from a TOML file, CLI
//! flags, or both (flags win); validation happens before any data is
//! touched.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::BoxscoreError;

/// First season with an 18-week regular-season schedule.
pub const FIRST_EIGHTEEN_WEEK_SEASON: u16 = 2021;

/// Number of regular-season weeks in a given season.
pub fn weeks_in_season(year: u16) -> u8 {
    if year >= FIRST_EIGHTEEN_WEEK_SEASON {
        18
    } else {
        17
    }
}

/// Directory layout and file naming for one pipeline run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory containing `nfl_pbp_<year>.csv` season exports.
    pub data_dir: PathBuf,
    /// Directory receiving `nfl_boxscore_<year>_<week>.csv` outputs.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/pbp_data"),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, BoxscoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| BoxscoreError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| BoxscoreError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Season play-by-play input file for a year.
    pub fn input_path(&self, year: u16) -> PathBuf {
        self.data_dir.join(format!("nfl_pbp_{year}.csv"))
    }

    /// Boxscore output file for a (year, week) unit.
    pub fn output_path(&self, year: u16, week: u8) -> PathBuf {
        self.output_dir
            .join(format!("nfl_boxscore_{year}_{week}.csv"))
    }
}

/// Reject weeks outside the season calendar before loading anything.
pub fn validate_week(year: u16, week: u8) -> Result<(), BoxscoreError> {
    let last = weeks_in_season(year);
    if week == 0 || week > last {
        return Err(BoxscoreError::InvalidConfig(format!(
            "week {week} is outside the {year} season (1..={last})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_calendar() {
        assert_eq!(weeks_in_season(2000), 17);
        assert_eq!(weeks_in_season(2020), 17);
        assert_eq!(weeks_in_season(2021), 18);
        assert_eq!(weeks_in_season(2024), 18);
    }

    #[test]
    fn test_validate_week_bounds() {
        assert!(validate_week(2023, 1).is_ok());
        assert!(validate_week(2023, 18).is_ok());
        assert!(validate_week(2020, 18).is_err());
        assert!(validate_week(2020, 17).is_ok());
        assert!(validate_week(2023, 0).is_err());
    }

    #[test]
    fn test_path_layout() {
        let config = Config {
            data_dir: PathBuf::from("data/pbp_data"),
            output_dir: PathBuf::from("out"),
        };
        assert_eq!(
            config.input_path(2023),
            PathBuf::from("data/pbp_data/nfl_pbp_2023.csv")
        );
        assert_eq!(
            config.output_path(2023, 1),
            PathBuf::from("out/nfl_boxscore_2023_1.csv")
        );
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxscore.toml");
        std::fs::write(&path, "data_dir = \"/srv/pbp\"\noutput_dir = \"/srv/box\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/pbp"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/box"));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxscore.toml");
        std::fs::write(&path, "data_dri = \"typo\"\n").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(BoxscoreError::ConfigFile { .. })
        ));
    }

    #[test]
    fn test_default_directories() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("data/pbp_data"));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }
}
