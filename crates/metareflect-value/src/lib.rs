//! Metareflect Values
//!
//! Dynamic value model for annotation payloads and the structural
//! deep-equality comparator used to detect conflicting annotations.

#![warn(missing_docs)]

pub mod equality;
pub mod error;
mod json;
pub mod kind;
pub mod value;

pub use equality::{is_equal, is_identical, same_value_zero};
pub use error::{Result, ValueError};
pub use kind::ValueKind;
pub use value::{
    BufferView, ClassId, ClassRef, DateValue, ElementKind, ErrorValue, FunctionId, FunctionRef,
    MapValue, ObjectId, ObjectValue, PatternValue, SetValue, Symbol, Value,
};
