//! Error types for filter state handling.

use thiserror::Error;

/// Errors raised while building or updating filter state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// Two descriptors claimed the same query parameter.
    #[error("filter field key is declared more than once: {field_key}")]
    DuplicateFieldKey {
        /// The repeated key.
        field_key: String,
    },

    /// An update named a key no field owns.
    #[error("no filter field owns the key: {field_key}")]
    UnknownFieldKey {
        /// The key that was not found.
        field_key: String,
    },

    /// The controller was mounted outside a Tokio runtime.
    #[error("filter controller requires a Tokio runtime: {message}")]
    NoRuntime {
        /// Detail from the runtime lookup.
        message: String,
    },
}
