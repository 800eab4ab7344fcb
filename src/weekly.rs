//! The weekly boxscore plan.
//!
//! Play-by-play rows carry per-play stats (`rushing_yards`, `interception`,
//! …) plus situational fields; the boxscore for a week is one aggregation
//! pass grouped by `(old_game_id_x, posteam)` — one output row per team per
//! game. Touchdown flags are derived before grouping: a touchdown is
//! offensive when the scoring team is the possession team, and its kind
//! follows the play type.

use crate::engine::{self, AggFunc, Aggregate, AggregatePlan, DerivedColumn};
use crate::error::BoxscoreError;
use crate::expr::RowExpr;
use crate::table::Table;

/// Group key: game, then possession team.
pub const GROUP_KEYS: [&str; 2] = ["old_game_id_x", "posteam"];

/// Build the aggregation plan for one week.
pub fn weekly_plan(week: u8) -> AggregatePlan {
    let off_td = RowExpr::col("td_team").equals(RowExpr::col("posteam"));

    AggregatePlan {
        filter: Some(RowExpr::col("week").equals(RowExpr::int(i64::from(week)))),
        derived: vec![
            DerivedColumn::new(
                "rushing_tds",
                off_td
                    .clone()
                    .and(RowExpr::col("play_type").equals(RowExpr::text("run"))),
            ),
            DerivedColumn::new(
                "receiving_tds",
                off_td
                    .clone()
                    .and(RowExpr::col("play_type").equals(RowExpr::text("pass"))),
            ),
            DerivedColumn::new("off_td", off_td),
            DerivedColumn::new(
                "def_td_allowed",
                RowExpr::col("td_team")
                    .not_equals(RowExpr::col("posteam"))
                    .and(RowExpr::col("td_team").is_not_null()),
            ),
        ],
        group_keys: GROUP_KEYS.iter().map(|&k| k.to_string()).collect(),
        aggregates: vec![
            Aggregate::new("passing_yards", AggFunc::Sum),
            Aggregate::new("rushing_yards", AggFunc::Sum),
            Aggregate::new("rushing_tds", AggFunc::Sum),
            Aggregate::new("receiving_yards", AggFunc::Sum),
            Aggregate::new("receiving_tds", AggFunc::Sum),
            Aggregate::new("off_td", AggFunc::Sum),
            Aggregate::new("def_td_allowed", AggFunc::Sum),
            Aggregate::new("two_point_conv_result", AggFunc::CountEqual("success".into())),
            Aggregate::new("interception", AggFunc::Sum),
            Aggregate::new("fumble_lost", AggFunc::Sum),
            Aggregate::new("field_goal_result", AggFunc::CountEqual("made".into())),
            Aggregate::new("field_goal_attempt", AggFunc::Sum),
            Aggregate::new("extra_point_result", AggFunc::CountEqual("good".into())),
            Aggregate::new("extra_point_attempt", AggFunc::Sum),
            Aggregate::new("posteam_score", AggFunc::Max),
        ],
    }
}

/// Aggregate one week of a season table into its boxscore.
pub fn week_boxscore(table: &Table, week: u8) -> Result<Table, BoxscoreError> {
    engine::aggregate(table, &weekly_plan(week))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    /// Column order for the fixture rows below.
    const COLUMNS: [&str; 16] = [
        "week",
        "old_game_id_x",
        "posteam",
        "td_team",
        "play_type",
        "passing_yards",
        "rushing_yards",
        "receiving_yards",
        "two_point_conv_result",
        "interception",
        "fumble_lost",
        "field_goal_result",
        "field_goal_attempt",
        "extra_point_result",
        "extra_point_attempt",
        "posteam_score",
    ];

    struct Play {
        week: i64,
        game: &'static str,
        posteam: &'static str,
        td_team: Option<&'static str>,
        play_type: &'static str,
        rushing_yards: i64,
        passing_yards: i64,
        posteam_score: i64,
    }

    impl Play {
        fn row(&self) -> Vec<Value> {
            let opt = |v: Option<&str>| match v {
                Some(s) => Value::Str(s.into()),
                None => Value::Null,
            };
            vec![
                Value::Int(self.week),
                Value::Str(self.game.into()),
                Value::Str(self.posteam.into()),
                opt(self.td_team),
                Value::Str(self.play_type.into()),
                Value::Int(self.passing_yards),
                Value::Int(self.rushing_yards),
                Value::Int(0),
                Value::Null,
                Value::Int(0),
                Value::Int(0),
                Value::Null,
                Value::Int(0),
                Value::Null,
                Value::Int(0),
                Value::Int(self.posteam_score),
            ]
        }
    }

    fn season(plays: &[Play]) -> Table {
        let mut t = Table::new(COLUMNS.iter().map(|&c| c.to_string()).collect()).unwrap();
        for play in plays {
            t.push_row(play.row()).unwrap();
        }
        t
    }

    #[test]
    fn test_week_boxscore_groups_by_game_and_team() {
        let table = season(&[
            Play {
                week: 1,
                game: "2023_01_DET_KC",
                posteam: "KC",
                td_team: Some("KC"),
                play_type: "run",
                rushing_yards: 5,
                passing_yards: 0,
                posteam_score: 7,
            },
            Play {
                week: 1,
                game: "2023_01_DET_KC",
                posteam: "KC",
                td_team: None,
                play_type: "pass",
                rushing_yards: 0,
                passing_yards: 12,
                posteam_score: 7,
            },
            Play {
                week: 1,
                game: "2023_01_DET_KC",
                posteam: "DET",
                td_team: Some("KC"),
                play_type: "pass",
                rushing_yards: 0,
                passing_yards: 0,
                posteam_score: 0,
            },
            Play {
                week: 2,
                game: "2023_02_KC_JAX",
                posteam: "KC",
                td_team: None,
                play_type: "run",
                rushing_yards: 40,
                passing_yards: 0,
                posteam_score: 3,
            },
        ]);

        let out = week_boxscore(&table, 1).unwrap();
        assert_eq!(out.row_count(), 2, "week 2 play must be filtered out");

        // KC offense: a rushing TD, 5 rushing yards, 12 passing yards.
        assert_eq!(out.value(0, "posteam"), Some(&Value::Str("KC".into())));
        assert_eq!(out.value(0, "rushing_tds"), Some(&Value::Int(1)));
        assert_eq!(out.value(0, "receiving_tds"), Some(&Value::Int(0)));
        assert_eq!(out.value(0, "off_td"), Some(&Value::Int(1)));
        assert_eq!(out.value(0, "def_td_allowed"), Some(&Value::Int(0)));
        assert_eq!(out.value(0, "rushing_yards"), Some(&Value::Int(5)));
        assert_eq!(out.value(0, "passing_yards"), Some(&Value::Int(12)));
        assert_eq!(out.value(0, "posteam_score"), Some(&Value::Int(7)));

        // DET possession with a KC (defensive) touchdown.
        assert_eq!(out.value(1, "posteam"), Some(&Value::Str("DET".into())));
        assert_eq!(out.value(1, "off_td"), Some(&Value::Int(0)));
        assert_eq!(out.value(1, "def_td_allowed"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_output_column_order_matches_the_plan() {
        let out = week_boxscore(&season(&[]), 1).unwrap();
        assert_eq!(
            out.columns(),
            [
                "old_game_id_x",
                "posteam",
                "passing_yards",
                "rushing_yards",
                "rushing_tds",
                "receiving_yards",
                "receiving_tds",
                "off_td",
                "def_td_allowed",
                "two_point_conv_result",
                "interception",
                "fumble_lost",
                "field_goal_result",
                "field_goal_attempt",
                "extra_point_result",
                "extra_point_attempt",
                "posteam_score",
            ]
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_stat_column_fails_the_whole_unit() {
        // A season export without kicking columns must abort, not emit a
        // partial boxscore.
        let mut t = Table::new(vec![
            "week".into(),
            "old_game_id_x".into(),
            "posteam".into(),
            "td_team".into(),
            "play_type".into(),
        ])
        .unwrap();
        t.push_row(vec![
            Value::Int(1),
            Value::Str("g".into()),
            Value::Str("KC".into()),
            Value::Null,
            Value::Str("run".into()),
        ])
        .unwrap();

        let err = week_boxscore(&t, 1).unwrap_err();
        assert!(matches!(err, BoxscoreError::MissingColumn { .. }));
    }
}
