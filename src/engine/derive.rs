//! Derived-column pass.
//!
//! Each surviving row is extended with the derived values, in plan order.
//! Derivations are evaluated against the row as extended so far, which is
//! what lets a later derivation reference an earlier one.

use std::collections::HashMap;

use crate::engine::DerivedColumn;
use crate::table::Table;
use crate::value::Value;

/// Materialize the filtered rows, extended with every derived column.
///
/// `columns` must already map each derived name to its extended position
/// (source columns first, then derivations in order).
pub(crate) fn extend(
    table: &Table,
    kept: &[usize],
    derived: &[DerivedColumn],
    columns: &HashMap<String, usize>,
) -> Vec<Vec<Value>> {
    let mut out = Vec::with_capacity(kept.len());
    for &i in kept {
        let mut row = table.rows()[i].clone();
        row.reserve(derived.len());
        for d in derived {
            let value = d.expr.eval(columns, &row);
            row.push(value);
        }
        out.push(row);
    }
    out
}
