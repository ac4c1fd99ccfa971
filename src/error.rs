//! Top-level error type for the `signdesk` binary and library callers.

use thiserror::Error;

use crate::filter::FilterError;
use crate::sequence::SequenceError;

/// Errors surfaced while configuring or driving the dashboard core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigndeskError {
    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A `key=value` filter edit could not be parsed.
    #[error("filter edit must look like key=value: {entry}")]
    InvalidEdit {
        /// The entry as written.
        entry: String,
    },

    /// Filter state rejected an operation.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Sequence editing rejected an operation.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
