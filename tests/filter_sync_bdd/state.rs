//! Scenario state for filter synchronisation BDD tests.

use std::sync::Arc;

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use signdesk::filter::{FilterDescriptor, FilterDescriptors, FilterSyncController};
use signdesk::MemoryNavigator;
use signdesk::telemetry::test_support::RecordingTelemetrySink;

pub(crate) use crate::support::runtime::SharedRuntime;

/// State shared across steps in a filter synchronisation scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct FilterSyncState {
    /// Paused Tokio runtime driving the debounce timer.
    pub(crate) runtime: Slot<SharedRuntime>,
    /// In-memory router standing in for the browser.
    pub(crate) navigator: Slot<Arc<MemoryNavigator>>,
    /// Controller under test.
    pub(crate) controller: Slot<FilterSyncController>,
    /// Page number reported by the host, when set explicitly.
    pub(crate) page_number: Slot<u32>,
    /// Telemetry events recorded by the controller.
    pub(crate) telemetry: Slot<Arc<RecordingTelemetrySink>>,
}

/// Filters offered on every list page in these scenarios.
#[expect(clippy::expect_used, reason = "fixed descriptor keys are unique")]
pub(crate) fn list_page_descriptors() -> FilterDescriptors {
    FilterDescriptors::new(vec![
        FilterDescriptor::text("search", "Search"),
        FilterDescriptor::option("status", "Status", []),
        FilterDescriptor::option("active", "Active", []),
    ])
    .expect("descriptor keys are unique")
}

/// Strips the surrounding double quotes from a captured step argument.
pub(crate) fn unquote(raw: &str) -> &str {
    raw.trim_matches('"')
}
