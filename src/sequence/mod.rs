//! Drag-and-drop reordering for ad and campaign lists.
//!
//! [`reorder`] is the pure list transformation. [`SequenceEditor`] wraps it
//! with stable entry keys, selection tracking and the rule that drops
//! outside a valid target are ignored.

mod editor;
mod error;
mod reorder;

pub use editor::{DropOutcome, EntryKey, SequenceEditor, SequenceEntry};
pub use error::SequenceError;
pub use reorder::reorder;
