//! Reflection options

use serde::Deserialize;

use crate::defaults::{DESIGN_TYPE_KEY, FUNCTION_TYPE_NAME, ROOT_TYPE_NAME};
use crate::error::Result;

/// Options for a [`ReflectionContext`](crate::ReflectionContext)
///
/// Every field is optional when loading from JSON; missing fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReflectOptions {
    /// Reserved key of the type annotation
    pub type_key: String,

    /// Name of the root class; names the registry root and chain walks stop below it
    pub root_type_name: String,

    /// Declared type name treated as "no type information"
    pub function_type_name: String,
}

impl Default for ReflectOptions {
    fn default() -> Self {
        Self {
            type_key: DESIGN_TYPE_KEY.to_string(),
            root_type_name: ROOT_TYPE_NAME.to_string(),
            function_type_name: FUNCTION_TYPE_NAME.to_string(),
        }
    }
}

impl ReflectOptions {
    /// Parse options from a JSON document
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReflectError;

    #[test]
    fn test_defaults() {
        let options = ReflectOptions::default();
        assert_eq!(options.type_key, "design:type");
        assert_eq!(options.root_type_name, "Object");
        assert_eq!(options.function_type_name, "Function");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = ReflectOptions::from_json(r#"{ "type_key": "meta:type" }"#).unwrap();
        assert_eq!(options.type_key, "meta:type");
        assert_eq!(options.root_type_name, "Object");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ReflectOptions::from_json("{ nope"),
            Err(ReflectError::InvalidOptions(_))
        ));
    }
}
