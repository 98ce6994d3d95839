//! The raw paginated response envelope
//!
//! Helix wraps every collection in the same shape:
//! `{ "data": [...], "pagination": { "cursor": "..." }, "total": n }`.
//! Rows pass through opaquely; only `pagination.cursor` and `total` are
//! inspected by the pagination engine.

use serde::Deserialize;

/// Cursor carrier inside the response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageCursor {
    /// Opaque token identifying the next page, absent once exhausted
    #[serde(default)]
    pub cursor: Option<String>,
}

/// One raw server page of rows of type `R`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsePage<R> {
    /// The rows of this page, in server order
    #[serde(default = "Vec::new")]
    pub data: Vec<R>,

    /// Cursor for the next page, if the server issued one
    #[serde(default)]
    pub pagination: Option<PageCursor>,

    /// Total size of the underlying collection, when the server reports it
    #[serde(default)]
    pub total: Option<u64>,
}

impl<R> ResponsePage<R> {
    /// Create a page from rows alone, with no cursor and no total
    pub fn new(data: Vec<R>) -> Self {
        Self {
            data,
            pagination: None,
            total: None,
        }
    }

    /// Attach a next-page cursor
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.pagination = Some(PageCursor {
            cursor: Some(cursor.into()),
        });
        self
    }

    /// Attach a server-reported total
    #[must_use]
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// The next-page cursor, if present and non-empty.
    ///
    /// Helix signals exhaustion either by omitting the pagination object or
    /// by sending an empty cursor string; both read as `None` here.
    pub fn cursor(&self) -> Option<&str> {
        self.pagination
            .as_ref()
            .and_then(|p| p.cursor.as_deref())
            .filter(|cursor| !cursor.is_empty())
    }
}
