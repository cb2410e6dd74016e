//! Type-directed coercion of native referral records.
//!
//! Referral details cross the boundary as a key-value map. Strings, integers,
//! doubles and booleans pass through; every other value is stringified so the
//! script side never sees a nested native structure.

use serde_json::{Map, Value};

/// Coerce every field of a referral record to a script-friendly value.
pub fn coerce_referral_fields(record: Map<String, Value>) -> Map<String, Value> {
    record
        .into_iter()
        .map(|(key, value)| (key, coerce_value(value)))
        .collect()
}

fn coerce_value(value: Value) -> Value {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => value,
        other => Value::String(other.to_string()),
    }
}
