//! Fuzz Value::parse and the group-key encoding.
//!
//! Parsing must never panic, rendering must never panic, and the null
//! marker must stay unreachable from string input.

#![no_main]

use boxscore::hash::{encode_group_key, group_key_hash};
use boxscore::value::Value;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let value = Value::parse(raw);
    let _ = value.render();
    let _ = value.is_truthy();

    let hash = group_key_hash(&[value.clone(), Value::Null]);
    let rehash = group_key_hash(&[value.clone(), Value::Null]);
    assert_eq!(hash, rehash, "group identity must be deterministic");

    // A parsed string never encodes like a null key.
    if !value.is_null() {
        assert_ne!(encode_group_key(&[value]), encode_group_key(&[Value::Null]));
    }
});
