//! Cell values for tabular data.
//!
//! A [`Value`] is one cell of a loaded table: null/missing, integer, float,
//! or string. CSV fields are parsed with [`Value::parse`] and serialized
//! back with [`Value::render`]; an empty field round-trips as [`Value::Null`].

use std::cmp::Ordering;

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value. Serialized as an empty CSV field.
    Null,
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Parse a raw CSV field.
    ///
    /// Empty fields become [`Value::Null`]; otherwise the narrowest numeric
    /// interpretation wins (integer, then float), falling back to a string.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Null;
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return Self::Float(f);
        }
        Self::Str(raw.to_string())
    }

    /// Serialize back to CSV field text.
    ///
    /// Integers carry no decimal point; floats use Rust's shortest
    /// round-trip formatting (full precision).
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view: integers widen to `f64`, strings and nulls do not.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Truth value used by filter predicates: null, zero, and the empty
    /// string are false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Str(s) => !s.is_empty(),
        }
    }

    /// Non-null equality: numerics compare by value (so `Int(1)` equals
    /// `Float(1.0)`), strings compare exactly, and a numeric never equals
    /// a string. Null handling is the caller's concern.
    pub fn eq_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    /// Ordering used by the `max` aggregate: numerics by value, strings
    /// lexicographically. Incomparable pairs (mixed families, NaN, nulls)
    /// yield `None` and are skipped by the accumulator.
    pub fn cmp_for_max(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        }
    }
}
