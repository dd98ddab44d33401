//! Error types for the OPACK core library.

use thiserror::Error;

/// Top-level error type for all OPACK operations.
#[derive(Error, Debug)]
pub enum OpackError {
    /// A ring buffer was requested with no slots.
    #[error("Ring buffer capacity must be at least 1")]
    ZeroCapacity,

    /// Restored ring buffer state has a write cursor outside its storage.
    #[error("Ring buffer cursor out of range: {cursor} (capacity: {capacity})")]
    CursorOutOfRange {
        /// Cursor that was read.
        cursor: usize,
        /// Number of slots in the buffer.
        capacity: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, OpackError>;
