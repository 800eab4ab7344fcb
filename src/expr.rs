//! Pure per-row expressions.
//!
//! [`RowExpr`] is the small expression tree used by filter predicates and
//! derived-column definitions. An expression reads only the current row —
//! no cross-row state — so derivation stays a single forward pass.
//!
//! Comparison semantics follow the source data's conventions for missing
//! values: `Eq` with a null operand is false, `Ne` with a null operand is
//! true, and `IsNotNull` exists to guard the latter. Comparisons evaluate
//! to `Int(1)` / `Int(0)` so a derived flag column can be summed directly.

use std::collections::HashMap;

use crate::value::Value;

/// A pure expression over one row.
#[derive(Debug, Clone)]
pub enum RowExpr {
    /// Read a column of the (possibly derived-extended) row.
    Column(String),
    /// A constant.
    Literal(Value),
    Eq(Box<RowExpr>, Box<RowExpr>),
    Ne(Box<RowExpr>, Box<RowExpr>),
    And(Box<RowExpr>, Box<RowExpr>),
    Or(Box<RowExpr>, Box<RowExpr>),
    IsNotNull(Box<RowExpr>),
}

impl RowExpr {
    pub fn col(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    pub fn lit(value: Value) -> Self {
        Self::Literal(value)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::Literal(Value::Str(s.into()))
    }

    pub fn int(i: i64) -> Self {
        Self::Literal(Value::Int(i))
    }

    pub fn equals(self, other: Self) -> Self {
        Self::Eq(Box::new(self), Box::new(other))
    }

    pub fn not_equals(self, other: Self) -> Self {
        Self::Ne(Box::new(self), Box::new(other))
    }

    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    pub fn is_not_null(self) -> Self {
        Self::IsNotNull(Box::new(self))
    }

    /// Collect every column name the expression reads.
    pub fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Column(name) => out.push(name),
            Self::Literal(_) => {}
            Self::Eq(a, b) | Self::Ne(a, b) | Self::And(a, b) | Self::Or(a, b) => {
                a.collect_columns(out);
                b.collect_columns(out);
            }
            Self::IsNotNull(inner) => inner.collect_columns(out),
        }
    }

    /// Evaluate against a row.
    ///
    /// `columns` maps names to positions in `row`. Column resolution is
    /// validated up front by the plan; an unresolved name here evaluates
    /// to null rather than panicking.
    pub fn eval(&self, columns: &HashMap<String, usize>, row: &[Value]) -> Value {
        match self {
            Self::Column(name) => columns
                .get(name)
                .and_then(|&i| row.get(i))
                .cloned()
                .unwrap_or(Value::Null),
            Self::Literal(v) => v.clone(),
            Self::Eq(a, b) => {
                let (a, b) = (a.eval(columns, row), b.eval(columns, row));
                let eq = !a.is_null() && !b.is_null() && a.eq_value(&b);
                flag(eq)
            }
            Self::Ne(a, b) => {
                let (a, b) = (a.eval(columns, row), b.eval(columns, row));
                let ne = a.is_null() || b.is_null() || !a.eq_value(&b);
                flag(ne)
            }
            Self::And(a, b) => {
                flag(a.eval(columns, row).is_truthy() && b.eval(columns, row).is_truthy())
            }
            Self::Or(a, b) => {
                flag(a.eval(columns, row).is_truthy() || b.eval(columns, row).is_truthy())
            }
            Self::IsNotNull(inner) => flag(!inner.eval(columns, row).is_null()),
        }
    }
}

fn flag(b: bool) -> Value {
    Value::Int(i64::from(b))
}
