//! Group-by reduction.
//!
//! Rows are assigned to groups by the xxh64 identity of their key tuple
//! (see [`crate::hash`]); each group keeps one accumulator per aggregation
//! entry. Groups are emitted in first-appearance order, so the result is
//! deterministic and reproducible for a given input order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::engine::{AggFunc, Aggregate};
use crate::error::BoxscoreError;
use crate::hash::group_key_hash;
use crate::table::Table;
use crate::value::Value;

/// Running state for one aggregation entry within one group.
#[derive(Debug)]
enum FieldAcc {
    Sum {
        int: i64,
        float: f64,
        fractional: bool,
    },
    Mean {
        sum: f64,
        count: u64,
    },
    Max {
        current: Option<Value>,
    },
    First {
        value: Option<Value>,
    },
    CountEqual {
        target: String,
        count: u64,
    },
}

impl FieldAcc {
    fn for_func(func: &AggFunc) -> Self {
        match func {
            AggFunc::Sum => Self::Sum {
                int: 0,
                float: 0.0,
                fractional: false,
            },
            AggFunc::Mean => Self::Mean { sum: 0.0, count: 0 },
            AggFunc::Max => Self::Max { current: None },
            AggFunc::First => Self::First { value: None },
            AggFunc::CountEqual(target) => Self::CountEqual {
                target: target.clone(),
                count: 0,
            },
        }
    }

    fn update(&mut self, value: &Value) {
        match self {
            Self::Sum {
                int,
                float,
                fractional,
            } => match value {
                Value::Int(v) => *int = int.saturating_add(*v),
                Value::Float(v) => {
                    *float += v;
                    *fractional = true;
                }
                // Nulls contribute zero; non-numeric values are ignored.
                Value::Null | Value::Str(_) => {}
            },
            Self::Mean { sum, count } => {
                if let Some(v) = value.as_f64() {
                    *sum += v;
                    *count = count.saturating_add(1);
                }
            }
            Self::Max { current } => {
                if value.is_null() {
                    return;
                }
                let larger = match current {
                    Some(cur) => value.cmp_for_max(cur) == Some(Ordering::Greater),
                    None => true,
                };
                if larger {
                    *current = Some(value.clone());
                }
            }
            Self::First { value: first } => {
                // First row wins, even when its value is null.
                if first.is_none() {
                    *first = Some(value.clone());
                }
            }
            Self::CountEqual { target, count } => {
                if value.as_str() == Some(target.as_str()) {
                    *count = count.saturating_add(1);
                }
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Self::Sum {
                int,
                float,
                fractional,
            } => {
                if fractional {
                    Value::Float(int as f64 + float)
                } else {
                    Value::Int(int)
                }
            }
            Self::Mean { sum, count } => {
                if count == 0 {
                    Value::Null
                } else {
                    Value::Float(sum / count as f64)
                }
            }
            Self::Max { current } => current.unwrap_or(Value::Null),
            Self::First { value } => value.unwrap_or(Value::Null),
            Self::CountEqual { count, .. } => Value::Int(count as i64),
        }
    }
}

/// Accumulated state for one group: its key tuple plus one accumulator per
/// aggregation entry.
#[derive(Debug)]
struct GroupAcc {
    keys: Vec<Value>,
    fields: Vec<FieldAcc>,
}

/// Reduce the filtered, derived rows into the result table.
pub(crate) fn reduce(
    rows: &[Vec<Value>],
    columns: &HashMap<String, usize>,
    group_keys: &[String],
    aggregates: &[Aggregate],
) -> Result<Table, BoxscoreError> {
    let key_idx = resolve(columns, group_keys.iter().map(String::as_str))?;
    let agg_idx = resolve(columns, aggregates.iter().map(|a| a.column.as_str()))?;

    let mut groups: HashMap<u64, usize> = HashMap::new();
    let mut accs: Vec<GroupAcc> = Vec::new();

    for row in rows {
        let keys: Vec<Value> = key_idx.iter().map(|&i| row[i].clone()).collect();
        let id = group_key_hash(&keys);

        let slot = match groups.get(&id).copied() {
            Some(slot) => slot,
            None => {
                let slot = accs.len();
                groups.insert(id, slot);
                accs.push(GroupAcc {
                    keys,
                    fields: aggregates
                        .iter()
                        .map(|a| FieldAcc::for_func(&a.func))
                        .collect(),
                });
                slot
            }
        };

        let acc = &mut accs[slot];
        for (field, &col) in acc.fields.iter_mut().zip(&agg_idx) {
            field.update(&row[col]);
        }
    }

    let mut out_columns: Vec<String> = Vec::with_capacity(group_keys.len() + aggregates.len());
    out_columns.extend(group_keys.iter().cloned());
    out_columns.extend(aggregates.iter().map(|a| a.column.clone()));
    let mut out = Table::new(out_columns)?;

    for acc in accs {
        let mut row = acc.keys;
        row.extend(acc.fields.into_iter().map(FieldAcc::finish));
        out.push_row(row)?;
    }
    Ok(out)
}

fn resolve<'a, I>(columns: &HashMap<String, usize>, names: I) -> Result<Vec<usize>, BoxscoreError>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(|name| {
            columns.get(name).copied().ok_or_else(|| {
                BoxscoreError::Internal(format!("unvalidated column reached reduce: {name}"))
            })
        })
        .collect()
}
