//! Support modules for playlist reordering BDD tests.

pub mod state;

pub(crate) use state::PlaylistState;
