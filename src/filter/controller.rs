//! Keeps editable filter state in step with the URL query.
//!
//! The controller has two inputs that both change the filter state:
//!
//! - **internal edits** ([`FilterSyncController::update_filters`] and
//!   friends) replace the state and restart the debounce; when it settles
//!   the controller navigates;
//! - **external changes** ([`FilterSyncController::reconcile`] and
//!   [`FilterSyncController::replace_descriptors`]) re-derive the state from
//!   the query and never navigate.
//!
//! Keeping these paths apart is what stops a navigation from feeding back
//! into another navigation.
//!
//! Two one-shot flags drive the settle logic. `first_load` starts true and
//! is consumed on mount, so mounting never navigates. `has_filtered` starts
//! false and becomes true on the first filtered navigation; it is never
//! reset while the controller lives.
//!
//! A shared `mounted` flag is cleared on unmount and checked by the settle
//! task when it fires, so a settle that a worker thread starts while the
//! controller goes away does not navigate.
//!
//! Two controllers must not share a query namespace with overlapping field
//! keys; they would overwrite each other's navigations.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;

use super::debounce::Debouncer;
use super::error::FilterError;
use super::field::{FilterDescriptors, FilterValue};
use super::plan::{NavigationPlan, filtered_query, plan_navigation};
use super::state::FilterState;
use crate::navigation::Navigator;
use crate::query::NavigableQuery;
use crate::telemetry::{
    NavigationTrigger, NoopTelemetrySink, SuppressionReason, TelemetryEvent, TelemetrySink,
};

/// Debounce applied to filter edits unless configured otherwise.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Mount-time settings for a [`FilterSyncController`].
#[derive(Clone)]
pub struct ControllerOptions {
    page_number: u32,
    debounce: Duration,
    telemetry: Arc<dyn TelemetrySink>,
}

impl ControllerOptions {
    /// Sets the 1-based page currently displayed.
    #[must_use]
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Sets the debounce delay.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            page_number: 1,
            debounce: DEFAULT_DEBOUNCE,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }
}

impl fmt::Debug for ControllerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerOptions")
            .field("page_number", &self.page_number)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

/// Filter/pagination URL synchronisation for one list page.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use signdesk::filter::{ControllerOptions, FilterDescriptor, FilterDescriptors, FilterSyncController};
/// use signdesk::navigation::MemoryNavigator;
/// use signdesk::query::NavigableQuery;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), signdesk::filter::FilterError> {
/// let navigator = Arc::new(MemoryNavigator::new("/screens", NavigableQuery::new()));
/// let descriptors = FilterDescriptors::new(vec![FilterDescriptor::text("search", "Search")])?;
/// let mut controller = FilterSyncController::mount(
///     descriptors,
///     navigator.clone(),
///     ControllerOptions::default().with_debounce(Duration::from_millis(10)),
/// )?;
///
/// controller.set_filter_value("search", "Lobby")?;
/// tokio::time::sleep(Duration::from_millis(50)).await;
///
/// assert_eq!(navigator.last_navigation().as_deref(), Some("/screens?page=1&search=lobby"));
/// # Ok(())
/// # }
/// ```
pub struct FilterSyncController {
    descriptors: FilterDescriptors,
    state: FilterState,
    observed_query: NavigableQuery,
    page_number: u32,
    first_load: bool,
    has_filtered: Arc<AtomicBool>,
    mounted: Arc<AtomicBool>,
    last_issued: Arc<Mutex<Option<NavigableQuery>>>,
    debouncer: Debouncer,
    navigator: Arc<dyn Navigator>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl FilterSyncController {
    /// Mounts a controller, deriving its state from the navigator's query.
    ///
    /// Mounting consumes the first-load guard and never navigates.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::NoRuntime`] when called outside a Tokio
    /// runtime; the debounce timer needs one.
    pub fn mount(
        descriptors: FilterDescriptors,
        navigator: Arc<dyn Navigator>,
        options: ControllerOptions,
    ) -> Result<Self, FilterError> {
        let runtime = Handle::try_current().map_err(|error| FilterError::NoRuntime {
            message: error.to_string(),
        })?;
        let observed_query = navigator.current_query();
        let state = FilterState::derive(&descriptors, &observed_query);

        let mut controller = Self {
            descriptors,
            state,
            observed_query,
            page_number: options.page_number,
            first_load: true,
            has_filtered: Arc::new(AtomicBool::new(false)),
            mounted: Arc::new(AtomicBool::new(true)),
            last_issued: Arc::new(Mutex::new(None)),
            debouncer: Debouncer::new(runtime, options.debounce),
            navigator,
            telemetry: options.telemetry,
        };
        tracing::debug!(
            fields = controller.state.len(),
            page_number = controller.page_number,
            "mounted filter controller"
        );
        controller.on_state_committed();
        Ok(controller)
    }

    /// Current filter state, for rendering inputs.
    #[must_use]
    pub const fn filter_state(&self) -> &FilterState {
        &self.state
    }

    /// Descriptors the state was derived from.
    #[must_use]
    pub const fn descriptors(&self) -> &FilterDescriptors {
        &self.descriptors
    }

    /// 1-based page used when every filter is cleared.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Updates the displayed page number, typically after the host fetched
    /// a new page of results.
    pub const fn set_page_number(&mut self, page_number: u32) {
        self.page_number = page_number;
    }

    /// Returns true until the first post-mount effect has run.
    #[must_use]
    pub const fn is_first_load(&self) -> bool {
        self.first_load
    }

    /// Returns true once a filtered navigation has been issued.
    #[must_use]
    pub fn has_filtered(&self) -> bool {
        self.has_filtered.load(Ordering::SeqCst)
    }

    /// Returns true while a debounced navigation is waiting.
    #[must_use]
    pub fn has_pending_navigation(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Replaces the state with `updater(current)` and restarts the debounce.
    pub fn update_filters<F>(&mut self, updater: F)
    where
        F: FnOnce(&FilterState) -> FilterState,
    {
        self.state = updater(&self.state);
        self.on_state_committed();
    }

    /// Sets one field's value and restarts the debounce.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownFieldKey`] when no field owns `key`;
    /// the state and the pending navigation are left untouched.
    pub fn set_filter_value(
        &mut self,
        key: &str,
        value: impl Into<FilterValue>,
    ) -> Result<(), FilterError> {
        let next = self.state.with_value(key, value)?;
        self.update_filters(|_| next);
        Ok(())
    }

    /// Unsets every field and restarts the debounce.
    pub fn clear_filters(&mut self) {
        self.update_filters(FilterState::cleared);
    }

    /// Re-reads the navigator's query and re-derives the state if it moved.
    ///
    /// Call this whenever the host observes a query change. It never
    /// schedules a navigation. When the derived state differs from the
    /// current one, any pending navigation is cancelled because the URL now
    /// wins over the unsettled edit.
    ///
    /// A query equal to the controller's own latest navigation is only
    /// recorded as observed; edits made since that navigation stay in place.
    ///
    /// Returns true when the state was replaced.
    pub fn reconcile(&mut self) -> bool {
        let query = self.navigator.current_query();
        if query == self.observed_query {
            return false;
        }
        self.observed_query = query;
        if self.take_own_echo() {
            tracing::trace!("query change is the echo of our own navigation");
            return false;
        }
        self.rederive()
    }

    /// Swaps the descriptors (for example once option lists have loaded)
    /// and re-derives the state against the last observed query.
    ///
    /// Follows the same rules as [`Self::reconcile`].
    pub fn replace_descriptors(&mut self, descriptors: FilterDescriptors) -> bool {
        if descriptors == self.descriptors {
            return false;
        }
        self.descriptors = descriptors;
        self.rederive()
    }

    /// Navigates to another page immediately, keeping active filters.
    ///
    /// `page_index` is zero-based, as reported by pagination controls. A
    /// pending filter navigation is left to fire on its own schedule.
    pub fn on_page_change(&self, page_index: u32) {
        let current = self.navigator.current_query();
        let query = filtered_query(&self.state, &current, page_index.saturating_add(1));
        issue_navigation(
            self.navigator.as_ref(),
            self.telemetry.as_ref(),
            &self.last_issued,
            NavigationTrigger::PageChange,
            query,
        );
    }

    /// Unmounts the controller, cancelling any pending navigation.
    ///
    /// Dropping the controller has the same effect.
    pub fn unmount(self) {
        tracing::debug!("unmounting filter controller");
        drop(self);
    }

    fn on_state_committed(&mut self) {
        if self.first_load {
            self.first_load = false;
            tracing::trace!("skipping filter navigation on first load");
            self.telemetry.record(TelemetryEvent::NavigationSuppressed {
                reason: SuppressionReason::FirstLoad,
            });
            return;
        }
        self.schedule_settle();
    }

    fn schedule_settle(&mut self) {
        let settle = SettleContext {
            state: self.state.clone(),
            page_number: self.page_number,
            has_filtered: Arc::clone(&self.has_filtered),
            mounted: Arc::clone(&self.mounted),
            last_issued: Arc::clone(&self.last_issued),
            navigator: Arc::clone(&self.navigator),
            telemetry: Arc::clone(&self.telemetry),
        };
        let superseded = self.debouncer.schedule(move || settle.run());
        tracing::trace!(
            superseded,
            delay = ?self.debouncer.delay(),
            "scheduled filter navigation"
        );
    }

    fn take_own_echo(&self) -> bool {
        let mut last_issued = self
            .last_issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if last_issued.as_ref() == Some(&self.observed_query) {
            *last_issued = None;
            true
        } else {
            false
        }
    }

    fn rederive(&mut self) -> bool {
        let derived = FilterState::derive(&self.descriptors, &self.observed_query);
        if derived == self.state {
            tracing::trace!("external change left filter values unchanged");
            return false;
        }
        self.state = derived;
        if self.debouncer.cancel() {
            tracing::debug!("external change superseded pending filter navigation");
        }
        self.telemetry.record(TelemetryEvent::NavigationSuppressed {
            reason: SuppressionReason::ExternalChange,
        });
        true
    }
}

impl fmt::Debug for FilterSyncController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSyncController")
            .field("state", &self.state)
            .field("observed_query", &self.observed_query)
            .field("page_number", &self.page_number)
            .field("first_load", &self.first_load)
            .field("has_filtered", &self.has_filtered())
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl Drop for FilterSyncController {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::SeqCst);
        if self.debouncer.cancel() {
            tracing::debug!("cancelled pending filter navigation on unmount");
        }
    }
}

/// Snapshot moved into the debounce task.
struct SettleContext {
    state: FilterState,
    page_number: u32,
    has_filtered: Arc<AtomicBool>,
    mounted: Arc<AtomicBool>,
    last_issued: Arc<Mutex<Option<NavigableQuery>>>,
    navigator: Arc<dyn Navigator>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl SettleContext {
    fn run(self) {
        if !self.mounted.load(Ordering::SeqCst) {
            tracing::trace!("controller unmounted before settle; not navigating");
            return;
        }
        let current = self.navigator.current_query();
        let has_filtered = self.has_filtered.load(Ordering::SeqCst);
        match plan_navigation(&self.state, &current, has_filtered, self.page_number) {
            NavigationPlan::Filtered(query) => {
                self.has_filtered.store(true, Ordering::SeqCst);
                issue_navigation(
                    self.navigator.as_ref(),
                    self.telemetry.as_ref(),
                    &self.last_issued,
                    NavigationTrigger::Filter,
                    query,
                );
            }
            NavigationPlan::Reset(query) => issue_navigation(
                self.navigator.as_ref(),
                self.telemetry.as_ref(),
                &self.last_issued,
                NavigationTrigger::FilterReset,
                query,
            ),
            NavigationPlan::Idle => {
                tracing::trace!("filters settled empty; nothing to navigate");
                self.telemetry.record(TelemetryEvent::NavigationSuppressed {
                    reason: SuppressionReason::NeverFiltered,
                });
            }
        }
    }
}

fn issue_navigation(
    navigator: &dyn Navigator,
    telemetry: &dyn TelemetrySink,
    last_issued: &Mutex<Option<NavigableQuery>>,
    trigger: NavigationTrigger,
    query: NavigableQuery,
) {
    let url = query.to_url(&navigator.current_path());
    tracing::debug!(?trigger, %url, "navigating");
    *last_issued.lock().unwrap_or_else(PoisonError::into_inner) = Some(query);
    navigator.navigate(&url);
    telemetry.record(TelemetryEvent::NavigationIssued { trigger, url });
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
