//! Immutable filter state derived from descriptors and the current query.
//!
//! A [`FilterState`] is never edited in place. Every update produces a new
//! state; fields that did not change are shared with the previous state via
//! `Arc`, so consumers can detect unchanged fields with `Arc::ptr_eq`.

use std::sync::Arc;

use super::error::FilterError;
use super::field::{FieldKind, FilterDescriptors, FilterField, FilterValue};
use crate::query::NavigableQuery;

/// Ordered sequence of filter fields with their current values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    fields: Vec<Arc<FilterField>>,
}

impl FilterState {
    /// Builds the state for `descriptors` from the values in `query`.
    ///
    /// See [`derive_filter_state`].
    #[must_use]
    pub fn derive(descriptors: &FilterDescriptors, query: &NavigableQuery) -> Self {
        let fields = descriptors
            .as_slice()
            .iter()
            .map(|descriptor| {
                let value = query
                    .get(&descriptor.field_key)
                    .map_or_else(FilterValue::empty, FilterValue::from_query);
                Arc::new(FilterField::new(descriptor.clone(), value))
            })
            .collect();
        Self { fields }
    }

    /// Returns the fields in display order.
    #[must_use]
    pub fn fields(&self) -> &[Arc<FilterField>] {
        &self.fields
    }

    /// Returns the field owning `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<FilterField>> {
        self.fields.iter().find(|field| field.field_key() == key)
    }

    /// Returns the current value for `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&FilterValue> {
        self.get(key).map(|field| &field.value)
    }

    /// Returns a new state with the value for `key` replaced.
    ///
    /// Text values of non-option fields are lower-cased before storage, and
    /// the text `true`/`false` is stored as a flag, matching what
    /// [`Self::derive`] reads back from the resulting URL. Every other field
    /// is shared with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownFieldKey`] when no field owns `key`.
    pub fn with_value(
        &self,
        key: &str,
        value: impl Into<FilterValue>,
    ) -> Result<Self, FilterError> {
        if self.get(key).is_none() {
            return Err(FilterError::UnknownFieldKey {
                field_key: key.to_owned(),
            });
        }

        let new_value = value.into();
        let fields = self
            .fields
            .iter()
            .map(|field| {
                if field.field_key() != key {
                    return Arc::clone(field);
                }
                let stored = match field.kind() {
                    FieldKind::Option => new_value.clone(),
                    FieldKind::String => new_value.clone().lowercased(),
                }
                .normalised();
                Arc::new(FilterField::new(field.descriptor.clone(), stored))
            })
            .collect();
        Ok(Self { fields })
    }

    /// Returns a new state with every value unset.
    #[must_use]
    pub fn cleared(&self) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                if field.is_active() {
                    Arc::new(FilterField::new(
                        field.descriptor.clone(),
                        FilterValue::empty(),
                    ))
                } else {
                    Arc::clone(field)
                }
            })
            .collect();
        Self { fields }
    }

    /// Iterates over `(field_key, query value)` for every non-empty field.
    pub fn active_pairs(&self) -> impl Iterator<Item = (&str, String)> {
        self.fields
            .iter()
            .filter(|field| field.is_active())
            .map(|field| (field.field_key(), field.value.to_query_value()))
    }

    /// Returns true when at least one field holds a value.
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.fields.iter().any(|field| field.is_active())
    }

    /// Returns true when a field owns `key`.
    #[must_use]
    pub fn owns(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the state has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Derives filter state from descriptors and the current query.
///
/// Each field takes its value from `query[field_key]`: the literal strings
/// `"true"` and `"false"` become booleans, anything else is kept as text, and
/// a missing key yields the empty value. The function is pure.
///
/// # Example
///
/// ```
/// use signdesk::filter::{FilterDescriptor, FilterDescriptors, FilterValue, derive_filter_state};
/// use signdesk::query::NavigableQuery;
///
/// let descriptors = FilterDescriptors::new(vec![
///     FilterDescriptor::option("active", "Active", []),
///     FilterDescriptor::text("search", "Search"),
/// ])?;
/// let state = derive_filter_state(&descriptors, &NavigableQuery::parse("active=true"));
///
/// assert_eq!(state.value("active"), Some(&FilterValue::Flag(true)));
/// assert_eq!(state.value("search"), Some(&FilterValue::empty()));
/// # Ok::<(), signdesk::filter::FilterError>(())
/// ```
#[must_use]
pub fn derive_filter_state(descriptors: &FilterDescriptors, query: &NavigableQuery) -> FilterState {
    FilterState::derive(descriptors, query)
}
