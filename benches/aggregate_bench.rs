//! Benchmarks for the column aggregation engine.
//!
//! These measure the full filter → derive → group → reduce pass over
//! synthetic play-by-play tables. All operations are pure Rust — no I/O.
//!
//! Run with: `cargo bench --bench aggregate_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use boxscore::engine::{self, AggFunc, Aggregate, AggregatePlan, DerivedColumn};
use boxscore::expr::RowExpr;
use boxscore::table::Table;
use boxscore::value::Value;

// ── Helpers ────────────────────────────────────────────────────────────────

const TEAMS: [&str; 8] = ["KC", "DET", "BUF", "NE", "JAX", "PHI", "SF", "DAL"];

/// Synthetic season: `n` plays spread over 18 weeks and 8 teams.
fn make_season(n: usize) -> Table {
    let mut table = Table::new(vec![
        "week".into(),
        "game".into(),
        "posteam".into(),
        "td_team".into(),
        "play_type".into(),
        "yards".into(),
    ])
    .unwrap();

    for i in 0..n {
        let week = (i % 18 + 1) as i64;
        let team = TEAMS[i % TEAMS.len()];
        let td_team = if i % 23 == 0 { Value::Str(team.into()) } else { Value::Null };
        let play_type = if i % 3 == 0 { "run" } else { "pass" };
        table
            .push_row(vec![
                Value::Int(week),
                Value::Str(format!("game_{}", i % 160)),
                Value::Str(team.into()),
                td_team,
                Value::Str(play_type.into()),
                Value::Int((i % 25) as i64),
            ])
            .unwrap();
    }
    table
}

fn weekly_ish_plan() -> AggregatePlan {
    AggregatePlan {
        filter: Some(RowExpr::col("week").equals(RowExpr::int(1))),
        derived: vec![
            DerivedColumn::new(
                "rushing_tds",
                RowExpr::col("td_team")
                    .equals(RowExpr::col("posteam"))
                    .and(RowExpr::col("play_type").equals(RowExpr::text("run"))),
            ),
            DerivedColumn::new(
                "off_td",
                RowExpr::col("td_team").equals(RowExpr::col("posteam")),
            ),
        ],
        group_keys: vec!["game".into(), "posteam".into()],
        aggregates: vec![
            Aggregate::new("yards", AggFunc::Sum),
            Aggregate::new("rushing_tds", AggFunc::Sum),
            Aggregate::new("off_td", AggFunc::Sum),
            Aggregate::new("play_type", AggFunc::CountEqual("run".into())),
        ],
    }
}

// ── Full pass ──────────────────────────────────────────────────────────────

fn bench_aggregate_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_pass");
    let plan = weekly_ish_plan();

    for rows in [1_000usize, 10_000, 50_000] {
        let table = make_season(rows);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}rows")),
            &table,
            |b, table| {
                b.iter(|| engine::aggregate(black_box(table), black_box(&plan)).unwrap());
            },
        );
    }
    group.finish();
}

// ── Grouping without filter/derive ─────────────────────────────────────────

fn bench_group_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_only");
    let plan = AggregatePlan {
        filter: None,
        derived: vec![],
        group_keys: vec!["game".into(), "posteam".into()],
        aggregates: vec![Aggregate::new("yards", AggFunc::Sum)],
    };

    for rows in [10_000usize, 50_000] {
        let table = make_season(rows);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}rows")),
            &table,
            |b, table| {
                b.iter(|| engine::aggregate(black_box(table), black_box(&plan)).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate_pass, bench_group_only);
criterion_main!(benches);
