//! Row filtering pass.
//!
//! Runs against source columns only — derivation happens after filtering,
//! so a predicate can never observe a derived column.

use crate::expr::RowExpr;
use crate::table::Table;

/// Indices of the rows that survive the predicate, in input order.
///
/// `None` keeps everything. A predicate result is accepted when truthy
/// (null and zero are false), so an equality test over a null cell drops
/// the row.
pub(crate) fn apply(table: &Table, predicate: Option<&RowExpr>) -> Vec<usize> {
    let Some(predicate) = predicate else {
        return (0..table.row_count()).collect();
    };

    let columns = table.column_map();
    let mut kept = Vec::new();
    for (i, row) in table.rows().iter().enumerate() {
        if predicate.eval(&columns, row).is_truthy() {
            kept.push(i);
        }
    }
    kept
}
