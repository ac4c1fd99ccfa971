//! Filter field descriptors and their current values.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FilterError;

/// Input widget a field is rendered with.
///
/// The kind only decides how values are normalised before storage; it does
/// not change how the backend interprets the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-text input. Values are lower-cased before storage.
    #[default]
    String,
    /// Selection from a fixed list of values. Stored verbatim.
    Option,
}

/// Current value of a filter field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Boolean value, produced from the literal query strings `true`/`false`.
    Flag(bool),
    /// Text value. The empty string means "unset".
    Text(String),
}

impl FilterValue {
    /// The unset value.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Returns true when the value is the empty text.
    ///
    /// `Flag(false)` is a real selection and therefore not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flag(_) => false,
            Self::Text(text) => text.is_empty(),
        }
    }

    /// Coerces a raw query-string value.
    #[must_use]
    pub fn from_query(raw: &str) -> Self {
        match raw {
            "true" => Self::Flag(true),
            "false" => Self::Flag(false),
            other => Self::Text(other.to_owned()),
        }
    }

    /// Returns the value as it appears in a query string.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        self.to_string()
    }

    pub(crate) fn lowercased(self) -> Self {
        match self {
            Self::Text(text) => Self::Text(text.to_lowercase()),
            flag @ Self::Flag(_) => flag,
        }
    }

    /// Applies the query coercion to text, so a stored value equals what
    /// re-deriving it from the URL yields.
    pub(crate) fn normalised(self) -> Self {
        match self {
            Self::Text(text) => Self::from_query(&text),
            flag @ Self::Flag(_) => flag,
        }
    }
}

impl Default for FilterValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// One entry of an option field's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionItem {
    /// A value with a separate display label.
    Labelled {
        /// Text shown to the user.
        render: String,
        /// Value written to the query string.
        value: FilterValue,
    },
    /// A bare value that is also its own label.
    Raw(FilterValue),
}

impl OptionItem {
    /// Value written to the query string when this item is chosen.
    #[must_use]
    pub const fn value(&self) -> &FilterValue {
        match self {
            Self::Labelled { value, .. } | Self::Raw(value) => value,
        }
    }

    /// Text shown for this item.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Labelled { render, .. } => render.clone(),
            Self::Raw(value) => value.to_string(),
        }
    }
}

/// Static description of a filter field, supplied by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// Query-parameter name owned by this field.
    pub field_key: String,
    /// Display label.
    pub title: String,
    /// Input widget kind.
    #[serde(default, rename = "type")]
    pub kind: FieldKind,
    /// Allowed values for option fields, in display order.
    #[serde(default)]
    pub list: Vec<OptionItem>,
}

impl FilterDescriptor {
    /// Creates a free-text field descriptor.
    pub fn text(field_key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field_key: field_key.into(),
            title: title.into(),
            kind: FieldKind::String,
            list: Vec::new(),
        }
    }

    /// Creates an option field descriptor.
    pub fn option(
        field_key: impl Into<String>,
        title: impl Into<String>,
        list: impl IntoIterator<Item = OptionItem>,
    ) -> Self {
        Self {
            field_key: field_key.into(),
            title: title.into(),
            kind: FieldKind::Option,
            list: list.into_iter().collect(),
        }
    }
}

/// Ordered set of descriptors with unique field keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDescriptors(Vec<FilterDescriptor>);

impl FilterDescriptors {
    /// Validates and wraps a descriptor list.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::DuplicateFieldKey`] when two descriptors share
    /// a `field_key`.
    pub fn new(descriptors: Vec<FilterDescriptor>) -> Result<Self, FilterError> {
        let mut seen = HashSet::new();
        for descriptor in &descriptors {
            if !seen.insert(descriptor.field_key.as_str()) {
                return Err(FilterError::DuplicateFieldKey {
                    field_key: descriptor.field_key.clone(),
                });
            }
        }
        Ok(Self(descriptors))
    }

    /// Returns the descriptors in display order.
    #[must_use]
    pub fn as_slice(&self) -> &[FilterDescriptor] {
        &self.0
    }

    /// Returns true when a descriptor owns `key`.
    #[must_use]
    pub fn owns(&self, key: &str) -> bool {
        self.0.iter().any(|descriptor| descriptor.field_key == key)
    }
}

/// A descriptor paired with its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterField {
    /// Static description of the field.
    #[serde(flatten)]
    pub descriptor: FilterDescriptor,
    /// Current value; empty text when unset.
    pub value: FilterValue,
}

impl FilterField {
    /// Pairs a descriptor with a value.
    #[must_use]
    pub const fn new(descriptor: FilterDescriptor, value: FilterValue) -> Self {
        Self { descriptor, value }
    }

    /// Query-parameter name owned by this field.
    #[must_use]
    pub fn field_key(&self) -> &str {
        &self.descriptor.field_key
    }

    /// Input widget kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.descriptor.kind
    }

    /// Returns true when the field holds a value worth sending.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }
}
