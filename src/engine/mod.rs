//! The column aggregation engine.
//!
//! One configurable pass replaces the source's three near-duplicate
//! scripts: filter rows, evaluate derived columns, group by a key tuple,
//! reduce each group with a fixed set of per-column aggregation functions.
//!
//! The engine is stateless. [`aggregate`] takes an immutable [`Table`] and
//! an [`AggregatePlan`] and returns a new result table; every (year, week)
//! unit is an independent invocation.
//!
//! # Submodules
//! - `filter` — row filtering pass
//! - `derive` — derived-column pass
//! - `group` — group-by reduction

pub mod derive;
pub mod filter;
pub mod group;

use std::collections::HashSet;

use crate::error::{BoxscoreError, Stage};
use crate::expr::RowExpr;
use crate::table::Table;

/// A derived column: a name plus the pure row expression producing it.
///
/// Derivations are applied in order; a later derivation may reference an
/// earlier one. A derivation may not shadow an existing column.
#[derive(Debug, Clone)]
pub struct DerivedColumn {
    pub name: String,
    pub expr: RowExpr,
}

impl DerivedColumn {
    pub fn new(name: impl Into<String>, expr: RowExpr) -> Self {
        Self {
            name: name.into(),
            expr,
        }
    }
}

/// Reduction function applied to one column within each group.
#[derive(Debug, Clone, PartialEq)]
pub enum AggFunc {
    /// Sum of non-null values; nulls contribute zero. Integer inputs stay
    /// integral until a float contribution is seen.
    Sum,
    /// Arithmetic mean over non-null values; null when the group has none.
    Mean,
    /// Maximum over non-null values; null when the group has none.
    Max,
    /// Value from the first row of the group in input order.
    First,
    /// Count of rows whose string value equals the target exactly.
    CountEqual(String),
}

/// One aggregation entry: the source column and its reduction.
///
/// The output column keeps the source column's name.
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub column: String,
    pub func: AggFunc,
}

impl Aggregate {
    pub fn new(column: impl Into<String>, func: AggFunc) -> Self {
        Self {
            column: column.into(),
            func,
        }
    }
}

/// Full configuration for one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct AggregatePlan {
    /// Rows failing this predicate are dropped before derivation. `None`
    /// keeps every row.
    pub filter: Option<RowExpr>,
    /// Derived columns, applied in order after filtering.
    pub derived: Vec<DerivedColumn>,
    /// Group key columns, in output order. Empty means one global group.
    pub group_keys: Vec<String>,
    /// Aggregation entries, in output order.
    pub aggregates: Vec<Aggregate>,
}

impl AggregatePlan {
    /// Validate every column reference against the table schema.
    ///
    /// The filter sees only source columns (it runs before derivation);
    /// derivation *i* sees source columns plus derivations `< i`; group
    /// keys and aggregates see the fully extended schema. The first absent
    /// column aborts the whole pass — nothing is ever written for a
    /// misconfigured unit.
    pub fn validate(&self, table: &Table) -> Result<(), BoxscoreError> {
        if let Some(filter) = &self.filter {
            let mut cols = Vec::new();
            filter.collect_columns(&mut cols);
            table.require_columns(cols, Stage::Filter)?;
        }

        let mut available: HashSet<&str> =
            table.columns().iter().map(String::as_str).collect();
        for derived in &self.derived {
            let mut cols = Vec::new();
            derived.expr.collect_columns(&mut cols);
            for col in cols {
                if !available.contains(col) {
                    return Err(BoxscoreError::MissingColumn {
                        column: col.to_string(),
                        stage: Stage::Derive,
                    });
                }
            }
            if !available.insert(derived.name.as_str()) {
                return Err(BoxscoreError::InvalidConfig(format!(
                    "derived column {} shadows an existing column",
                    derived.name
                )));
            }
        }

        for key in &self.group_keys {
            if !available.contains(key.as_str()) {
                return Err(BoxscoreError::MissingColumn {
                    column: key.clone(),
                    stage: Stage::Group,
                });
            }
        }

        for agg in &self.aggregates {
            if !available.contains(agg.column.as_str()) {
                return Err(BoxscoreError::MissingColumn {
                    column: agg.column.clone(),
                    stage: Stage::Aggregate,
                });
            }
        }

        Ok(())
    }
}

/// Run one full filter → derive → group → reduce pass.
///
/// The result table has one row per distinct group key tuple, in
/// first-appearance order, with columns = group keys (in the given order)
/// followed by one output per aggregation entry (in the given order).
pub fn aggregate(table: &Table, plan: &AggregatePlan) -> Result<Table, BoxscoreError> {
    plan.validate(table)?;

    // Extended schema: source columns, then derived columns in order.
    let mut columns = table.column_map();
    let base_len = table.columns().len();
    for (i, derived) in plan.derived.iter().enumerate() {
        columns.insert(derived.name.clone(), base_len + i);
    }

    let kept = filter::apply(table, plan.filter.as_ref());
    let rows = derive::extend(table, &kept, &plan.derived, &columns);
    group::reduce(&rows, &columns, &plan.group_keys, &plan.aggregates)
}
