//! xxHash-based group identity for the aggregation engine.
//!
//! A group key tuple is encoded to a single byte string and hashed with a
//! fixed-seed xxh64, giving each distinct key tuple a deterministic 64-bit
//! identity. Encoding rules:
//! - values are joined with an ASCII record separator, so `("ab", "c")` and
//!   `("a", "bc")` encode differently;
//! - nulls use a dedicated marker that cannot collide with the literal
//!   string `"NULL"`, so null key values group together and only together;
//! - each value carries a one-byte type tag, so `Int(1)`, `Float(1.0)`, and
//!   `Str("1")` are three distinct groups (exact value equality).

use xxhash_rust::xxh64::xxh64;

use crate::value::Value;

// Fixed seed for deterministic hashing across runs.
const GROUP_SEED: u64 = 0x9e3779b97f4a7c15;

const RECORD_SEP: char = '\x1E';
const NULL_MARKER: &str = "\x00NULL\x00";

/// Encode a group key tuple to its canonical text form.
pub fn encode_group_key(values: &[Value]) -> String {
    let mut encoded = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            encoded.push(RECORD_SEP);
        }
        match value {
            Value::Null => encoded.push_str(NULL_MARKER),
            Value::Int(v) => {
                encoded.push('i');
                encoded.push_str(&v.to_string());
            }
            Value::Float(v) => {
                encoded.push('f');
                encoded.push_str(&v.to_string());
            }
            Value::Str(v) => {
                encoded.push('s');
                encoded.push_str(v);
            }
        }
    }
    encoded
}

/// 64-bit identity of a group key tuple.
pub fn group_key_hash(values: &[Value]) -> u64 {
    xxh64(encode_group_key(values).as_bytes(), GROUP_SEED)
}
