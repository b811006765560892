//! Type-match checks against declared type names
//!
//! A value matches a type name when its primitive tag (`typeof`) matches
//! case-insensitively, or, for composite values, when its constructor
//! name does. Absent values match nothing but their tag: `undefined`
//! for undefined and `object` for null.

use metareflect_value::Value;

use crate::defaults::ROOT_TYPE_NAME;

/// Whether `value` matches the type named `accepted`
pub fn check_type(value: &Value, accepted: &str) -> bool {
    if value.type_of().eq_ignore_ascii_case(accepted) {
        return true;
    }
    match value {
        Value::Undefined | Value::Null => false,
        _ if value.kind().is_composite() => value
            .constructor_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(accepted)),
        _ => false,
    }
}

/// Whether `value` matches any of the names
pub fn check_types<S: AsRef<str>>(value: &Value, accepted: &[S]) -> bool {
    accepted.iter().any(|name| check_type(value, name.as_ref()))
}

/// Type information as recorded in metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// A single type name
    Name(String),
    /// Any of several type names
    Names(Vec<String>),
    /// A constructor-like descriptor, identified by its name
    Constructor(String),
    /// Unrecognised shape; matches everything
    Any,
}

impl TypeSpec {
    /// Interpret a metadata payload as type information
    ///
    /// Strings name one type, arrays list several (non-string entries are
    /// skipped), named functions and objects with a string `name` field are
    /// constructors. Anything else carries no constraint.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => TypeSpec::Name(name.to_string()),
            Value::Array(items) => TypeSpec::Names(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            ),
            Value::Function(f) if !f.name().is_empty() => {
                TypeSpec::Constructor(f.name().to_string())
            }
            Value::Object(obj) => match obj.get("name").and_then(Value::as_str) {
                Some(name) if !name.is_empty() => TypeSpec::Constructor(name.to_string()),
                _ => TypeSpec::Any,
            },
            _ => TypeSpec::Any,
        }
    }
}

impl From<&str> for TypeSpec {
    fn from(name: &str) -> Self {
        TypeSpec::Name(name.to_string())
    }
}

impl From<&[&str]> for TypeSpec {
    fn from(names: &[&str]) -> Self {
        TypeSpec::Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TypeSpec {
    fn from(names: [&str; N]) -> Self {
        TypeSpec::Names(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Whether `value` satisfies `spec`, with `Object` as the catch-all constructor
pub fn evaluate_design_types(value: &Value, spec: &TypeSpec) -> bool {
    evaluate_design_types_with(value, spec, ROOT_TYPE_NAME)
}

/// Whether `value` satisfies `spec`; constructors named `root_name` accept anything
pub fn evaluate_design_types_with(value: &Value, spec: &TypeSpec, root_name: &str) -> bool {
    match spec {
        TypeSpec::Name(name) => check_type(value, name),
        TypeSpec::Names(names) => check_types(value, names.as_slice()),
        TypeSpec::Constructor(name) if name == root_name => true,
        TypeSpec::Constructor(name) => check_type(value, name),
        TypeSpec::Any => true,
    }
}
