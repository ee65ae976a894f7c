//! Deep structural comparison of JSON values.
//!
//! [`compare`] defines a total ordering across heterogeneous JSON types:
//! values of different types are ordered by a fixed type-rank table, values
//! of the same type recursively. The ordering is the engine's definition of
//! equality — the patch generators emit nothing for any branch that
//! compares [`CompareResult::Equal`], and the `test` patch operation
//! matches on it.

use std::cmp::Ordering;

use serde_json::{Map, Number, Value};

/// Outcome of a structural comparison.
///
/// `Error` is reserved for structurally invalid input; a type mismatch is
/// an ordered result, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareResult {
    Less,
    Equal,
    Greater,
    Error,
}

impl CompareResult {
    fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => CompareResult::Less,
            Ordering::Equal => CompareResult::Equal,
            Ordering::Greater => CompareResult::Greater,
        }
    }

    pub fn is_equal(&self) -> bool {
        *self == CompareResult::Equal
    }
}

// ── Type ranks ────────────────────────────────────────────────────────────

/// Fixed rank table for heterogeneous ordering. `false` and `true` are
/// distinct ranks, so a false/true comparison is decided here as well. The
/// table is part of the wire-level contract and must not change.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(false) => 1,
        Value::Bool(true) => 2,
        Value::Object(_) => 3,
        Value::Array(_) => 4,
        Value::String(_) => 5,
        Value::Number(_) => 6,
    }
}

// ── Comparison ────────────────────────────────────────────────────────────

/// Deep three-way comparison of two JSON values.
///
/// Values of different types order by [`type_rank`]. Numbers compare as
/// IEEE-754 doubles; NaN and the infinities are unrepresentable in
/// `serde_json::Number`, so the ordering is total over every representable
/// tree (the non-total `partial_cmp` arm maps to `Error` and is
/// unreachable in practice).
pub fn compare(lhs: &Value, rhs: &Value) -> CompareResult {
    let lhs_rank = type_rank(lhs);
    let rhs_rank = type_rank(rhs);
    if lhs_rank != rhs_rank {
        return CompareResult::from_ordering(lhs_rank.cmp(&rhs_rank));
    }
    match (lhs, rhs) {
        (Value::Null, Value::Null) => CompareResult::Equal,
        // Equal ranks, so both are the same literal.
        (Value::Bool(_), Value::Bool(_)) => CompareResult::Equal,
        (Value::Object(lhs), Value::Object(rhs)) => compare_object(lhs, rhs),
        (Value::Array(lhs), Value::Array(rhs)) => compare_array(lhs, rhs),
        (Value::String(lhs), Value::String(rhs)) => compare_string(lhs, rhs),
        (Value::Number(lhs), Value::Number(rhs)) => compare_number(lhs, rhs),
        _ => CompareResult::Error,
    }
}

/// Compare two objects: member count first, then member-by-member with
/// both member lists sorted by key (ordinal). Insertion order never
/// affects the result; the first differing key decides by string
/// comparison, equal keys recurse into their values.
pub fn compare_object(lhs: &Map<String, Value>, rhs: &Map<String, Value>) -> CompareResult {
    if lhs.len() != rhs.len() {
        return CompareResult::from_ordering(lhs.len().cmp(&rhs.len()));
    }
    let mut lhs_keys: Vec<&str> = lhs.keys().map(String::as_str).collect();
    let mut rhs_keys: Vec<&str> = rhs.keys().map(String::as_str).collect();
    lhs_keys.sort_unstable();
    rhs_keys.sort_unstable();
    for (lhs_key, rhs_key) in lhs_keys.iter().zip(&rhs_keys) {
        match lhs_key.cmp(rhs_key) {
            Ordering::Less => return CompareResult::Less,
            Ordering::Greater => return CompareResult::Greater,
            Ordering::Equal => {
                let result = compare(&lhs[*lhs_key], &rhs[*rhs_key]);
                if !result.is_equal() {
                    return result;
                }
            }
        }
    }
    CompareResult::Equal
}

/// Compare two arrays: length first, then element-wise in order,
/// short-circuiting on the first non-equal element.
pub fn compare_array(lhs: &[Value], rhs: &[Value]) -> CompareResult {
    if lhs.len() != rhs.len() {
        return CompareResult::from_ordering(lhs.len().cmp(&rhs.len()));
    }
    for (lhs_element, rhs_element) in lhs.iter().zip(rhs) {
        let result = compare(lhs_element, rhs_element);
        if !result.is_equal() {
            return result;
        }
    }
    CompareResult::Equal
}

/// Ordinal byte-wise string comparison (not locale-aware).
pub fn compare_string(lhs: &str, rhs: &str) -> CompareResult {
    CompareResult::from_ordering(lhs.cmp(rhs))
}

fn compare_number(lhs: &Number, rhs: &Number) -> CompareResult {
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(lhs), Some(rhs)) => match lhs.partial_cmp(&rhs) {
            Some(ordering) => CompareResult::from_ordering(ordering),
            None => CompareResult::Error,
        },
        _ => CompareResult::Error,
    }
}
