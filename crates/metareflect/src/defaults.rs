//! Default constants for reflection configuration.

/// Reserved annotation key holding the declared type of a member.
pub const DESIGN_TYPE_KEY: &str = "design:type";

/// Name of the root class every chain terminates at.
pub const ROOT_TYPE_NAME: &str = "Object";

/// Declared type name that carries no type information (untyped callables).
pub const FUNCTION_TYPE_NAME: &str = "Function";
