//! Reflection errors

use thiserror::Error;

use metareflect_value::ClassId;

/// Errors raised while declaring classes or loading options
///
/// Resolution itself never fails; only the declaration side does.
#[derive(Debug, Error)]
pub enum ReflectError {
    /// Class id not present in the registry
    #[error("Unknown class: {0}")]
    UnknownClass(ClassId),

    /// A class with this name is already registered
    #[error("Class already registered: {name}")]
    DuplicateClass {
        /// Class name
        name: String,
    },

    /// A member with this name is already declared on the class
    #[error("Member {member} already declared on {class}")]
    DuplicateMember {
        /// Class name
        class: String,
        /// Member name
        member: String,
    },

    /// Options document that does not parse
    #[error("Invalid reflection options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Result alias for reflection operations
pub type Result<T> = std::result::Result<T, ReflectError>;
