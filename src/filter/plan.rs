//! Decides which URL, if any, a settled filter edit navigates to.

use super::state::FilterState;
use crate::query::{NavigableQuery, PAGE_PARAM};

/// Outcome of inspecting the filter state once the debounce settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationPlan {
    /// At least one field is set: jump to page 1 with the filters applied.
    Filtered(NavigableQuery),
    /// Every field was cleared after an earlier filtered navigation: return
    /// to the unfiltered page.
    Reset(NavigableQuery),
    /// Nothing has ever been filtered; leave the URL alone.
    Idle,
}

impl NavigationPlan {
    /// Returns the query to navigate to, if any.
    #[must_use]
    pub const fn query(&self) -> Option<&NavigableQuery> {
        match self {
            Self::Filtered(query) | Self::Reset(query) => Some(query),
            Self::Idle => None,
        }
    }
}

/// Builds the plan for a settled filter state.
///
/// `current` is the query at settle time. Keys in it that no field owns,
/// other than `page`, are carried over so page-size and similar settings
/// survive filtering.
#[must_use]
pub fn plan_navigation(
    state: &FilterState,
    current: &NavigableQuery,
    has_filtered: bool,
    page_number: u32,
) -> NavigationPlan {
    if state.has_active() {
        NavigationPlan::Filtered(filtered_query(state, current, 1))
    } else if has_filtered {
        let mut query = NavigableQuery::from([(PAGE_PARAM, page_number.to_string())]);
        for (key, value) in foreign_pairs(state, current).iter() {
            query.insert(key, value);
        }
        NavigationPlan::Reset(query)
    } else {
        NavigationPlan::Idle
    }
}

/// Builds `page=<page>` followed by the carried-over keys and every active
/// filter value.
#[must_use]
pub fn filtered_query(state: &FilterState, current: &NavigableQuery, page: u32) -> NavigableQuery {
    let mut query = NavigableQuery::from([(PAGE_PARAM, page.to_string())]);
    for (key, value) in foreign_pairs(state, current).iter() {
        query.insert(key, value);
    }
    for (key, value) in state.active_pairs() {
        query.insert(key, value);
    }
    query
}

fn foreign_pairs(state: &FilterState, current: &NavigableQuery) -> NavigableQuery {
    current.filtered(|key| key != PAGE_PARAM && !state.owns(key))
}
