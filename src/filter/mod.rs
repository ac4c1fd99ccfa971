//! URL-synchronised filter state for list pages.
//!
//! List pages (screens, campaigns, ads, users) expose a row of filter inputs
//! above a paginated table. This module keeps those inputs, the page number
//! and the URL query in step:
//!
//! - [`derive_filter_state`] turns descriptors plus a query into state;
//! - [`FilterState`] applies edits without mutating earlier states;
//! - [`plan_navigation`] decides where a settled edit navigates;
//! - [`FilterSyncController`] wires these to a debounced [`crate::navigation::Navigator`].

mod controller;
mod debounce;
mod error;
mod field;
mod plan;
mod state;

pub use controller::{ControllerOptions, DEFAULT_DEBOUNCE, FilterSyncController};
pub use debounce::Debouncer;
pub use error::FilterError;
pub use field::{
    FieldKind, FilterDescriptor, FilterDescriptors, FilterField, FilterValue, OptionItem,
};
pub use plan::{NavigationPlan, filtered_query, plan_navigation};
pub use state::{FilterState, derive_filter_state};
