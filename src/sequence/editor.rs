//! Drag-reorderable lists with stable entry keys.
//!
//! Ad playlists and campaign schedules are edited by dragging rows. Each
//! row gets an [`EntryKey`] when it is added; the key never changes while
//! the row lives, so it can serve as the render key and as the join key for
//! selection state.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SequenceError;
use super::reorder::reorder;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Stable identity of one sequence entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryKey(Uuid);

impl EntryKey {
    /// Generates a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing identifier, for entries loaded from the backend.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A value paired with its stable key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceEntry<T> {
    key: EntryKey,
    value: T,
}

impl<T> SequenceEntry<T> {
    /// Stable key of this entry.
    #[must_use]
    pub const fn key(&self) -> EntryKey {
        self.key
    }

    /// The wrapped value.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }
}

/// Result of a drag gesture as reported by the drag-and-drop layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    /// Index the drag started from.
    pub source: usize,
    /// Index the item was dropped at; `None` when dropped outside any target.
    pub destination: Option<usize>,
}

impl DropOutcome {
    /// A drop onto `destination`.
    #[must_use]
    pub const fn onto(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    /// A drop outside every valid target.
    #[must_use]
    pub const fn outside(source: usize) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

/// Ordered list of keyed entries plus the set of selected keys.
pub struct SequenceEditor<T> {
    entries: Vec<SequenceEntry<T>>,
    selected: HashSet<EntryKey>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<T> SequenceEditor<T> {
    /// Creates an empty editor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            selected: HashSet::new(),
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Creates an editor holding `values`, each with a fresh key.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut editor = Self::new();
        for value in values {
            editor.push(value);
        }
        editor
    }

    /// Sets the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[SequenceEntry<T>] {
        &self.entries
    }

    /// Keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = EntryKey> + '_ {
        self.entries.iter().map(SequenceEntry::key)
    }

    /// Values in display order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(SequenceEntry::value)
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the editor holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry with `key`.
    #[must_use]
    pub fn position(&self, key: EntryKey) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    /// Value of the entry with `key`.
    #[must_use]
    pub fn get(&self, key: EntryKey) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(SequenceEntry::value)
    }

    /// Appends `value` and returns its new key.
    pub fn push(&mut self, value: T) -> EntryKey {
        let key = EntryKey::generate();
        self.entries.push(SequenceEntry { key, value });
        key
    }

    /// Removes the entry with `key`, dropping it from the selection too.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::UnknownEntry`] when no entry has `key`.
    pub fn remove(&mut self, key: EntryKey) -> Result<T, SequenceError> {
        let index = self
            .position(key)
            .ok_or(SequenceError::UnknownEntry { key })?;
        self.selected.remove(&key);
        Ok(self.entries.remove(index).value)
    }

    /// Returns true when the entry with `key` is selected.
    #[must_use]
    pub fn is_selected(&self, key: EntryKey) -> bool {
        self.selected.contains(&key)
    }

    /// Flips the selection of the entry with `key` and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::UnknownEntry`] when no entry has `key`.
    pub fn toggle_selected(&mut self, key: EntryKey) -> Result<bool, SequenceError> {
        if self.position(key).is_none() {
            return Err(SequenceError::UnknownEntry { key });
        }
        if self.selected.remove(&key) {
            Ok(false)
        } else {
            self.selected.insert(key);
            Ok(true)
        }
    }

    /// Selected values in display order.
    pub fn selected_values(&self) -> impl Iterator<Item = &T> {
        self.entries
            .iter()
            .filter(|entry| self.selected.contains(&entry.key))
            .map(SequenceEntry::value)
    }
}

impl<T: Clone> SequenceEditor<T> {
    /// Moves the entry at `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when either index is not
    /// below [`Self::len`]; the list is left unchanged.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), SequenceError> {
        self.entries = reorder(&self.entries, from, to)?;
        tracing::debug!(from, to, len = self.entries.len(), "reordered sequence");
        self.telemetry.record(TelemetryEvent::SequenceReordered {
            from,
            to,
            len: self.entries.len(),
        });
        Ok(())
    }

    /// Applies the end of a drag gesture.
    ///
    /// Drops outside any target, or onto an index the list does not have,
    /// are ignored. A drop back onto its own position is a no-op and is not
    /// recorded as a reorder. Returns true when the list changed order.
    pub fn apply_drop(&mut self, outcome: DropOutcome) -> bool {
        let Some(destination) = outcome.destination else {
            tracing::trace!(source = outcome.source, "drop outside any target");
            self.telemetry.record(TelemetryEvent::DropAborted {
                source: outcome.source,
            });
            return false;
        };
        if outcome.source == destination && destination < self.entries.len() {
            tracing::trace!(source = outcome.source, "drop onto its own position");
            return false;
        }

        match self.move_entry(outcome.source, destination) {
            Ok(()) => true,
            Err(error) => {
                tracing::trace!(%error, "ignoring drop onto invalid target");
                self.telemetry.record(TelemetryEvent::DropAborted {
                    source: outcome.source,
                });
                false
            }
        }
    }
}

impl<T> Default for SequenceEditor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SequenceEditor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceEditor")
            .field("entries", &self.entries)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}
