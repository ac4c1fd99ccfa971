//! Behavioural tests for filter and pagination URL synchronisation.

mod support {
    #[path = "../support/runtime.rs"]
    pub mod runtime;
}

#[path = "filter_sync_bdd/mod.rs"]
mod filter_sync_bdd_support;

use std::sync::Arc;
use std::time::Duration;

use filter_sync_bdd_support::FilterSyncState;
use filter_sync_bdd_support::state::{list_page_descriptors, unquote};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use signdesk::filter::{ControllerOptions, DEFAULT_DEBOUNCE, FilterSyncController, FilterValue};
use signdesk::telemetry::test_support::RecordingTelemetrySink;
use signdesk::telemetry::{SuppressionReason, TelemetryEvent};
use signdesk::{MemoryNavigator, NavigableQuery};
use support::runtime::ensure_paused_runtime;

#[fixture]
fn filter_sync_state() -> FilterSyncState {
    FilterSyncState::default()
}

fn advance(state: &FilterSyncState, by: Duration) {
    let Some(runtime) = state.runtime.get() else {
        panic!("runtime not initialised");
    };
    runtime.block_on(async { tokio::time::sleep(by).await });
}

fn navigation_count(state: &FilterSyncState) -> usize {
    state
        .navigator
        .with_ref(|navigator| navigator.navigation_count())
        .unwrap_or_else(|| panic!("navigator not initialised"))
}

// Given steps

#[given("the displayed page is {page:u32}")]
fn given_displayed_page(filter_sync_state: &FilterSyncState, page: u32) {
    filter_sync_state.page_number.set(page);
}

#[given("a list page at {path} with query {query}")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn given_list_page(filter_sync_state: &FilterSyncState, path: String, query: String) {
    let runtime =
        ensure_paused_runtime(&filter_sync_state.runtime).expect("runtime should build");
    let navigator = Arc::new(MemoryNavigator::new(
        unquote(&path),
        NavigableQuery::parse(unquote(&query)),
    ));
    let page_number = filter_sync_state.page_number.get().unwrap_or(1);
    let telemetry = Arc::new(RecordingTelemetrySink::default());
    let options = ControllerOptions::default()
        .with_page_number(page_number)
        .with_telemetry(telemetry.clone());

    let controller = runtime
        .block_on(async {
            FilterSyncController::mount(list_page_descriptors(), navigator.clone(), options)
        })
        .expect("mount should succeed inside the runtime");

    filter_sync_state.navigator.set(navigator);
    filter_sync_state.telemetry.set(telemetry);
    filter_sync_state.controller.set(controller);
}

// When steps

#[when("the user types {value} into {field}")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn when_user_types(filter_sync_state: &FilterSyncState, value: String, field: String) {
    filter_sync_state
        .controller
        .with_mut(|controller| controller.set_filter_value(unquote(&field), unquote(&value)))
        .expect("controller not initialised")
        .expect("field should exist");
}

#[when("the user selects {value} for {field}")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn when_user_selects(filter_sync_state: &FilterSyncState, value: String, field: String) {
    let selected = FilterValue::from_query(unquote(&value));
    filter_sync_state
        .controller
        .with_mut(|controller| controller.set_filter_value(unquote(&field), selected))
        .expect("controller not initialised")
        .expect("field should exist");
}

#[when("{millis:u64} milliseconds pass")]
fn when_time_passes(filter_sync_state: &FilterSyncState, millis: u64) {
    advance(filter_sync_state, Duration::from_millis(millis));
}

#[when("the debounce window elapses")]
fn when_debounce_elapses(filter_sync_state: &FilterSyncState) {
    advance(filter_sync_state, DEFAULT_DEBOUNCE + Duration::from_millis(1));
}

#[when("the user moves to page index {index:u32}")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn when_user_changes_page(filter_sync_state: &FilterSyncState, index: u32) {
    filter_sync_state
        .controller
        .with_ref(|controller| controller.on_page_change(index))
        .expect("controller not initialised");
}

#[when("the browser shows query {query}")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn when_browser_shows_query(filter_sync_state: &FilterSyncState, query: String) {
    filter_sync_state
        .navigator
        .with_ref(|navigator| navigator.replace_query(NavigableQuery::parse(unquote(&query))))
        .expect("navigator not initialised");
    let changed = filter_sync_state
        .controller
        .with_mut(FilterSyncController::reconcile)
        .expect("controller not initialised");
    assert!(changed, "new query should change the filter state");
}

#[when("the user leaves the page")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn when_user_leaves(filter_sync_state: &FilterSyncState) {
    let controller = filter_sync_state
        .controller
        .take()
        .expect("controller not initialised");
    controller.unmount();
}

// Then steps

#[then("no navigation has happened")]
fn then_no_navigation(filter_sync_state: &FilterSyncState) {
    assert_eq!(navigation_count(filter_sync_state), 0);
}

#[then("exactly {count:usize} navigation has happened")]
fn then_one_navigation(filter_sync_state: &FilterSyncState, count: usize) {
    assert_eq!(navigation_count(filter_sync_state), count);
}

#[then("exactly {count:usize} navigations have happened")]
fn then_navigations(filter_sync_state: &FilterSyncState, count: usize) {
    assert_eq!(navigation_count(filter_sync_state), count);
}

#[then("the last navigation is {url}")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn then_last_navigation(filter_sync_state: &FilterSyncState, url: String) {
    let last = filter_sync_state
        .navigator
        .with_ref(|navigator| navigator.last_navigation())
        .expect("navigator not initialised");
    assert_eq!(last.as_deref(), Some(unquote(&url)));
}

#[then("the {field} filter shows {value}")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn then_filter_shows(filter_sync_state: &FilterSyncState, field: String, value: String) {
    let shown = filter_sync_state
        .controller
        .with_ref(|controller| controller.filter_state().value(unquote(&field)).cloned())
        .expect("controller not initialised");
    assert_eq!(shown, Some(FilterValue::from(unquote(&value))));
}

#[then("the change was recorded as external")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn then_recorded_external(filter_sync_state: &FilterSyncState) {
    let events = filter_sync_state
        .telemetry
        .with_ref(|telemetry| telemetry.events())
        .expect("telemetry not initialised");
    assert!(events.contains(&TelemetryEvent::NavigationSuppressed {
        reason: SuppressionReason::ExternalChange,
    }));
}

// Scenarios

#[scenario(path = "tests/features/filter_sync.feature", index = 0)]
fn mounting_does_not_navigate(filter_sync_state: FilterSyncState) {
    let _ = filter_sync_state;
}

#[scenario(path = "tests/features/filter_sync.feature", index = 1)]
fn rapid_edits_collapse(filter_sync_state: FilterSyncState) {
    let _ = filter_sync_state;
}

#[scenario(path = "tests/features/filter_sync.feature", index = 2)]
fn clearing_returns_to_displayed_page(filter_sync_state: FilterSyncState) {
    let _ = filter_sync_state;
}

#[scenario(path = "tests/features/filter_sync.feature", index = 3)]
fn pagination_skips_debounce(filter_sync_state: FilterSyncState) {
    let _ = filter_sync_state;
}

#[scenario(path = "tests/features/filter_sync.feature", index = 4)]
fn back_navigation_does_not_navigate(filter_sync_state: FilterSyncState) {
    let _ = filter_sync_state;
}

#[scenario(path = "tests/features/filter_sync.feature", index = 5)]
fn leaving_cancels_pending_navigation(filter_sync_state: FilterSyncState) {
    let _ = filter_sync_state;
}

#[scenario(path = "tests/features/filter_sync.feature", index = 6)]
fn edits_across_fields_collapse(filter_sync_state: FilterSyncState) {
    let _ = filter_sync_state;
}
