//! JSON literals as values
//!
//! Lets payloads be written as `serde_json::json!` literals. Objects keep
//! their key order and become plain objects of the root class.

use crate::value::{ObjectValue, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from(&json)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::string(s.as_str()),
            serde_json::Value::Array(items) => Value::array(items.iter().map(Value::from)),
            serde_json::Value::Object(fields) => {
                let mut object = ObjectValue::plain();
                for (key, value) in fields {
                    object.set(key.as_str(), Value::from(value));
                }
                Value::from(object)
            }
        }
    }
}
