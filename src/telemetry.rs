//! Structured telemetry events and sinks.
//!
//! The dashboard core emits a small set of events describing URL-state
//! transitions and list reorders. Sinks are injected so hosts can forward
//! them to their own collectors; nothing is transmitted by default.

use std::io;

use serde::{Deserialize, Serialize};

/// What caused a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTrigger {
    /// A settled filter edit with at least one active value.
    Filter,
    /// A settled filter edit that cleared every value.
    FilterReset,
    /// A pagination control.
    PageChange,
}

/// Why a navigation did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionReason {
    /// The controller was just mounted.
    FirstLoad,
    /// The filters settled empty and no filtered navigation ever happened.
    NeverFiltered,
    /// The query changed outside the controller.
    ExternalChange,
}

/// A structured telemetry event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// The controller asked the router to navigate.
    NavigationIssued {
        /// Cause of the navigation.
        trigger: NavigationTrigger,
        /// Target URL.
        url: String,
    },
    /// A state change that would have navigated did not.
    NavigationSuppressed {
        /// Why nothing was navigated.
        reason: SuppressionReason,
    },
    /// A list entry was moved.
    SequenceReordered {
        /// Original index.
        from: usize,
        /// New index.
        to: usize,
        /// Length of the list.
        len: usize,
    },
    /// A drag ended without a valid drop target.
    DropAborted {
        /// Index the drag started from.
        source: usize,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sinks for asserting on emitted events in tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::{Mutex, PoisonError};

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every event in memory.
    #[derive(Debug, Default)]
    pub struct RecordingTelemetrySink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingTelemetrySink {
        /// Returns a copy of the recorded events.
        #[must_use]
        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Removes and returns the recorded events.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .drain(..)
                .collect()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        fn record(&self, event: TelemetryEvent) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event);
        }
    }
}
