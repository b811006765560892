//! Value classification
//!
//! Every comparison and type check starts by tagging each operand with a
//! [`ValueKind`] and then branches on the tag.

use crate::value::Value;

/// Classification of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// Boolean primitive
    Bool,
    /// Number primitive
    Number,
    /// String primitive
    String,
    /// Symbol primitive
    Symbol,
    /// Callable
    Function,
    /// Date composite
    Date,
    /// Pattern composite
    Pattern,
    /// Error composite
    Error,
    /// Ordered sequence
    Array,
    /// Key-value map
    Map,
    /// Unique-value set
    Set,
    /// Binary buffer view
    Buffer,
    /// General object
    Object,
}

impl ValueKind {
    /// `undefined` or `null`
    pub fn is_absent(self) -> bool {
        matches!(self, ValueKind::Undefined | ValueKind::Null)
    }

    /// Whether values of this kind are objects with identity and structure
    pub fn is_composite(self) -> bool {
        matches!(
            self,
            ValueKind::Date
                | ValueKind::Pattern
                | ValueKind::Error
                | ValueKind::Array
                | ValueKind::Map
                | ValueKind::Set
                | ValueKind::Buffer
                | ValueKind::Object
        )
    }

    /// Primitive type tag (`typeof`)
    pub fn type_tag(self) -> &'static str {
        match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Symbol => "symbol",
            ValueKind::Function => "function",
            ValueKind::Null
            | ValueKind::Date
            | ValueKind::Pattern
            | ValueKind::Error
            | ValueKind::Array
            | ValueKind::Map
            | ValueKind::Set
            | ValueKind::Buffer
            | ValueKind::Object => "object",
        }
    }
}

impl Value {
    /// Classify this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::Function(_) => ValueKind::Function,
            Value::Date(_) => ValueKind::Date,
            Value::Pattern(_) => ValueKind::Pattern,
            Value::Error(_) => ValueKind::Error,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
            Value::Set(_) => ValueKind::Set,
            Value::Buffer(_) => ValueKind::Buffer,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Primitive type tag (`typeof`)
    pub fn type_of(&self) -> &'static str {
        self.kind().type_tag()
    }

    /// Constructor name of a composite value; `None` for primitives and functions
    pub fn constructor_name(&self) -> Option<&str> {
        match self {
            Value::Date(_) => Some("Date"),
            Value::Pattern(_) => Some("RegExp"),
            Value::Error(e) => Some(&e.name),
            Value::Array(_) => Some("Array"),
            Value::Map(_) => Some("Map"),
            Value::Set(_) => Some("Set"),
            Value::Buffer(b) => Some(b.element().constructor_name()),
            Value::Object(o) => Some(&o.class().name),
            _ => None,
        }
    }
}
