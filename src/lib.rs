//! Signdesk: list-page state synchronisation for a signage admin dashboard.
//!
//! The dashboard's list pages (screens, campaigns, ads, users) keep their
//! filter inputs and pagination in the URL query, and its playlist editors
//! let users drag ads and campaigns into order. This crate holds the state
//! machines behind both:
//!
//! - [`filter`] mirrors filter inputs against the query string and navigates
//!   after a debounce, without looping on its own navigations;
//! - [`sequence`] reorders keyed lists in response to drag gestures.
//!
//! Routing, rendering and the backend API stay outside; the crate talks to
//! the router through [`navigation::Navigator`].

pub mod config;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod query;
pub mod sequence;
pub mod telemetry;

pub use config::SigndeskConfig;
pub use error::SigndeskError;
pub use filter::{FilterSyncController, FilterState, derive_filter_state};
pub use navigation::{MemoryNavigator, Navigator};
pub use query::NavigableQuery;
pub use sequence::{SequenceEditor, reorder};
