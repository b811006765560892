//! Structural deep equality
//!
//! [`is_equal`] compares two values by structure rather than identity.
//! Each operand is classified once and the comparison branches on the
//! pair of kinds, checking the narrow composite kinds (dates, patterns,
//! errors, arrays, maps, sets, buffers) before the general object walk.
//!
//! Field names listed in `ignored` are skipped by the general object walk
//! at every depth. Symbol fields are matched against `ignored` through
//! their `Symbol(description)` form.

use std::sync::Arc;

use crate::value::{ObjectValue, Value};

/// Compare two values structurally, skipping the `ignored` field names
///
/// Total: never panics, any pair of values yields an answer.
pub fn is_equal(a: &Value, b: &Value, ignored: &[&str]) -> bool {
    if is_identical(a, b) {
        // +0 and -0 are identical but not equal
        return match (a, b) {
            (Value::Number(x), Value::Number(y)) if *x == 0.0 => {
                x.is_sign_negative() == y.is_sign_negative()
            }
            _ => true,
        };
    }

    let (ka, kb) = (a.kind(), b.kind());

    if ka.is_absent() || kb.is_absent() {
        return ka == kb;
    }
    if ka.type_tag() != kb.type_tag() {
        return false;
    }

    if let (Value::Number(x), Value::Number(y)) = (a, b) {
        if x.is_nan() && y.is_nan() {
            return true;
        }
    }

    // Not identical and not composite: plain equality already failed
    if !ka.is_composite() {
        return false;
    }

    match (a, b) {
        (Value::Date(x), Value::Date(y)) => x.timestamp_millis() == y.timestamp_millis(),

        (Value::Pattern(x), Value::Pattern(y)) => x.canonical() == y.canonical(),

        (Value::Error(x), Value::Error(y)) => x.name == y.name && x.message == y.message,

        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|(ex, ey)| is_equal(ex, ey, ignored))
        }

        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, vx)| match y.get(key) {
                    Some(vy) => is_equal(vx, vy, ignored),
                    None => false,
                })
        }

        (Value::Set(x), Value::Set(y)) => {
            x.len() == y.len() && x.iter().all(|item| y.contains(item))
        }

        (Value::Buffer(x), Value::Buffer(y)) => {
            x.byte_length() == y.byte_length()
                && x.byte_offset() == y.byte_offset()
                && x.buffer_length() == y.buffer_length()
                && x.bytes() == y.bytes()
        }

        (Value::Object(x), Value::Object(y)) => objects_equal(x, y, ignored),

        // Composites of different kinds never share a prototype
        _ => false,
    }
}

fn objects_equal(a: &ObjectValue, b: &ObjectValue, ignored: &[&str]) -> bool {
    let retained = |key: &str| !ignored.contains(&key);

    let a_fields: Vec<_> = a.fields().iter().filter(|(k, _)| retained(k)).collect();
    let b_count = b.fields().keys().filter(|k| retained(k)).count();
    if a_fields.len() != b_count {
        return false;
    }
    for (key, av) in a_fields {
        let Some(bv) = b.get(key) else {
            return false;
        };
        if !is_equal(av, bv, ignored) {
            return false;
        }
    }

    let a_symbols: Vec<_> = a
        .symbols()
        .iter()
        .filter(|(sym, _)| retained(&sym.to_string()))
        .collect();
    let b_count = b
        .symbols()
        .keys()
        .filter(|sym| retained(&sym.to_string()))
        .count();
    if a_symbols.len() != b_count {
        return false;
    }
    for (sym, av) in a_symbols {
        let Some(bv) = b.get_symbol(sym) else {
            return false;
        };
        if !is_equal(av, bv, ignored) {
            return false;
        }
    }

    a.class().id == b.class().id
}

/// Identity comparison: same primitive value or same composite instance
///
/// Numbers compare with IEEE equality, so NaN is never identical to itself
/// and the two zeroes are identical.
pub fn is_identical(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Function(x), Value::Function(y)) => x == y,
        (Value::Date(x), Value::Date(y)) => Arc::ptr_eq(x, y),
        (Value::Pattern(x), Value::Pattern(y)) => Arc::ptr_eq(x, y),
        (Value::Error(x), Value::Error(y)) => Arc::ptr_eq(x, y),
        (Value::Array(x), Value::Array(y)) => Arc::ptr_eq(x, y),
        (Value::Map(x), Value::Map(y)) => Arc::ptr_eq(x, y),
        (Value::Set(x), Value::Set(y)) => Arc::ptr_eq(x, y),
        (Value::Buffer(x), Value::Buffer(y)) => Arc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

/// Key equality used by maps and sets: identity, except NaN matches NaN
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        _ => is_identical(a, b),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        is_equal(self, other, &[])
    }
}
