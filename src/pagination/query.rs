//! Pagination filter and query construction
//!
//! Callers describe where a page walk starts and how large pages are with
//! an explicit [`Pagination`] value; it renders to the query-parameter
//! fragment the API expects (`after`, `before`, `first`).

use crate::http::Query;

/// Forward/backward cursor position and page size for a paginated call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Cursor to continue after (forward pagination)
    pub after: Option<String>,
    /// Cursor to end before (backward pagination)
    pub before: Option<String>,
    /// Number of rows per page, 1-100; the server default is 20
    pub limit: Option<u32>,
}

impl Pagination {
    /// Create an empty filter (server defaults apply)
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after the given cursor
    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// End before the given cursor
    #[must_use]
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Request pages of the given size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Merge this filter into a query
    pub fn apply_to(&self, query: &mut Query) {
        if let Some(after) = &self.after {
            query.set("after", after);
        }
        if let Some(before) = &self.before {
            query.set("before", before);
        }
        if let Some(limit) = self.limit {
            query.set("first", limit.to_string());
        }
    }

    /// Render this filter as a standalone query
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        self.apply_to(&mut query);
        query
    }
}
