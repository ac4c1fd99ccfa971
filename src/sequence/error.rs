//! Error types for sequence editing.

use thiserror::Error;

use super::editor::EntryKey;

/// Errors raised while reordering or editing a sequence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SequenceError {
    /// An index fell outside the sequence.
    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },

    /// No entry carries the given key.
    #[error("no sequence entry has key {key}")]
    UnknownEntry {
        /// The key that was not found.
        key: EntryKey,
    },
}
