//! Value construction errors

use thiserror::Error;

/// Errors raised while building composite values
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValueError {
    /// Unknown or repeated pattern flag
    #[error("Invalid pattern flags: {flags}")]
    InvalidPatternFlags {
        /// Flags as given
        flags: String,
    },

    /// Pattern source that does not compile
    #[error("Invalid pattern /{pattern}/: {reason}")]
    InvalidPattern {
        /// Pattern source text
        pattern: String,
        /// Compiler diagnostic
        reason: String,
    },

    /// Buffer view that does not fit its backing buffer
    #[error("Buffer view out of range: offset {offset} + length {length} exceeds {buffer_length}")]
    BufferOutOfRange {
        /// Byte offset into the backing buffer
        offset: usize,
        /// Byte length of the view
        length: usize,
        /// Byte length of the backing buffer
        buffer_length: usize,
    },

    /// Buffer view whose offset or length is not a multiple of the element width
    #[error("Buffer view misaligned for {element}: offset {offset}, length {length}")]
    MisalignedBuffer {
        /// Element constructor name
        element: &'static str,
        /// Byte offset into the backing buffer
        offset: usize,
        /// Byte length of the view
        length: usize,
    },
}

/// Result alias for value construction
pub type Result<T> = std::result::Result<T, ValueError>;
