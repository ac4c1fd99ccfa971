//! Ordered query-string mapping shared with the host router.
//!
//! A [`NavigableQuery`] mirrors the key/value pairs of a URL query string in
//! the order they were written. Serialisation uses
//! `application/x-www-form-urlencoded` through the `url` crate, so spaces and
//! reserved characters survive the round trip through the address bar.

use url::form_urlencoded;

/// Name of the pagination parameter every list page understands.
pub const PAGE_PARAM: &str = "page";

/// Ordered key/value view of a URL query string.
///
/// Keys are unique; inserting an existing key replaces its value in place so
/// the original position is kept.
///
/// # Example
///
/// ```
/// use signdesk::query::NavigableQuery;
///
/// let query = NavigableQuery::parse("?page=2&search=lobby%20screen");
/// assert_eq!(query.get("page"), Some("2"));
/// assert_eq!(query.get("search"), Some("lobby screen"));
/// assert_eq!(query.to_query_string(), "page=2&search=lobby+screen");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigableQuery {
    pairs: Vec<(String, String)>,
}

impl NavigableQuery {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parses a raw query string, with or without the leading `?`.
    ///
    /// Repeated keys keep the last value seen, at the position of the first.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.strip_prefix('?').unwrap_or(raw);
        form_urlencoded::parse(trimmed.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Extracts the query portion of a URL such as `/screens?page=2`.
    ///
    /// Returns an empty query when the URL carries none.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        url.split_once('?')
            .map_or_else(Self::new, |(_, raw)| Self::parse(raw))
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or replaces the value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key_owned = key.into();
        let value_owned = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key_owned) {
            Some(slot) => slot.1 = value_owned,
            None => self.pairs.push((key_owned, value_owned)),
        }
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let position = self.pairs.iter().position(|(existing, _)| existing == key)?;
        Some(self.pairs.remove(position).1)
    }

    /// Returns a copy holding only the pairs whose key satisfies `keep`.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        self.pairs
            .iter()
            .filter(|(key, _)| keep(key))
            .cloned()
            .collect()
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true when the query holds no pairs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serialises the pairs as `key=value&key2=value2`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Builds `<path>?<query>`, or just `<path>` when the query is empty.
    #[must_use]
    pub fn to_url(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{}", self.to_query_string())
        }
    }
}

impl<K, V> FromIterator<(K, V)> for NavigableQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for NavigableQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
