//! Read/write boundary to the host router.
//!
//! Controllers never touch the address bar directly. They read the current
//! path and query through a [`Navigator`] and write only by asking it to
//! navigate, which keeps them testable against fakes.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::query::NavigableQuery;

/// Host routing collaborator.
///
/// `navigate` is fire-and-forget: implementations own any failure handling
/// and must not block the caller.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Returns the query string currently shown in the address bar.
    fn current_query(&self) -> NavigableQuery;

    /// Returns the path currently shown in the address bar, without query.
    fn current_path(&self) -> String;

    /// Navigates to `url` (a path with an optional query string).
    fn navigate(&self, url: &str);
}

#[derive(Debug, Default)]
struct Location {
    path: String,
    query: NavigableQuery,
    history: Vec<String>,
}

/// In-memory router that records every navigation.
///
/// Navigating updates the current location the way a browser would, so a
/// host can feed the new query back into its controllers.
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    location: Mutex<Location>,
}

impl MemoryNavigator {
    /// Starts at `path` with `query`.
    pub fn new(path: impl Into<String>, query: NavigableQuery) -> Self {
        Self {
            location: Mutex::new(Location {
                path: path.into(),
                query,
                history: Vec::new(),
            }),
        }
    }

    /// Replaces the current location without recording a navigation.
    ///
    /// Models changes the controller did not cause, such as the back button
    /// or a hand-edited URL.
    pub fn replace_query(&self, query: NavigableQuery) {
        self.lock().query = query;
    }

    /// Returns every URL navigated to, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Returns the most recent navigation.
    #[must_use]
    pub fn last_navigation(&self) -> Option<String> {
        self.lock().history.last().cloned()
    }

    /// Number of navigations recorded.
    #[must_use]
    pub fn navigation_count(&self) -> usize {
        self.lock().history.len()
    }

    fn lock(&self) -> MutexGuard<'_, Location> {
        self.location.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for MemoryNavigator {
    fn current_query(&self) -> NavigableQuery {
        self.lock().query.clone()
    }

    fn current_path(&self) -> String {
        self.lock().path.clone()
    }

    fn navigate(&self, url: &str) {
        let mut location = self.lock();
        let (path, raw_query) = url.split_once('?').unwrap_or((url, ""));
        location.path = path.to_owned();
        location.query = NavigableQuery::parse(raw_query);
        location.history.push(url.to_owned());
        tracing::debug!(url, "navigated");
    }
}
