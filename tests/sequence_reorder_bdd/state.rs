//! Scenario state for playlist reordering BDD tests.

use std::sync::Arc;

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use signdesk::sequence::{EntryKey, SequenceEditor};
use signdesk::telemetry::test_support::RecordingTelemetrySink;

/// State shared across steps in a playlist reordering scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct PlaylistState {
    /// Playlist editor under test.
    pub(crate) editor: Slot<SequenceEditor<String>>,
    /// Key/value pairs captured before the first drop.
    pub(crate) keys_before: Slot<Vec<(EntryKey, String)>>,
    /// Telemetry events recorded by the editor.
    pub(crate) telemetry: Slot<Arc<RecordingTelemetrySink>>,
}

/// Splits a quoted, comma-separated list of file names.
pub(crate) fn parse_names(raw: &str) -> Vec<String> {
    raw.trim_matches('"')
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
