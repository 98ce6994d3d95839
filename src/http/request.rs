//! Request descriptors
//!
//! An [`ApiRequest`] is an immutable description of one endpoint call:
//! resource path, base query parameters, and the OAuth scope the endpoint
//! requires. Derived requests (e.g. the cursor overlay used while
//! paginating) clone the descriptor instead of mutating it.

use std::collections::BTreeMap;

/// Query parameters: string keys mapped to one or many scalar values.
///
/// Repeated values for a key become repeated query-string pairs, which is
/// how Helix encodes list filters (`?id=1&id=2`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, Vec<String>>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all values for a key with a single value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), vec![value.into()]);
    }

    /// Add a value for a key, keeping any existing values
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    /// Add several values for a key
    pub fn append_all(
        &mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) {
        let entry = self.params.entry(key.into()).or_default();
        entry.extend(values.into_iter().map(Into::into));
    }

    /// Values currently stored for a key
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// Whether the query holds no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate the query as flat `(key, value)` pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().flat_map(|(key, values)| {
            values.iter().map(move |value| (key.as_str(), value.as_str()))
        })
    }
}

/// An immutable description of a single Helix endpoint call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    path: String,
    query: Query,
    scope: Option<String>,
}

impl ApiRequest {
    /// Create a request for a resource path relative to the API base URL
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Query::new(),
            scope: None,
        }
    }

    /// Add a single query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.append(key, value);
        self
    }

    /// Add a repeated query parameter
    #[must_use]
    pub fn query_values(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.query.append_all(key, values);
        self
    }

    /// Replace the whole query
    #[must_use]
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Declare the OAuth scope this endpoint requires
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// The resource path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters
    pub fn query_params(&self) -> &Query {
        &self.query
    }

    /// The OAuth scope the endpoint requires, if any
    pub fn required_scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Derive a new request with the `after` cursor overlaid.
    ///
    /// The receiver is left untouched; each page fetch works from a fresh
    /// copy of the base descriptor.
    #[must_use]
    pub fn with_cursor(&self, cursor: &str) -> Self {
        let mut derived = self.clone();
        derived.query.set("after", cursor);
        derived
    }
}
