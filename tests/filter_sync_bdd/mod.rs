//! Support modules for filter synchronisation BDD tests.

pub mod state;

pub(crate) use state::FilterSyncState;
