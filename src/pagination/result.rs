//! Eagerly materialized single-page results

use super::page::ResponsePage;
use crate::error::Result;

/// One mapped page of results together with the server-reported total.
///
/// Built synchronously from an already-fetched [`ResponsePage`]; holds no
/// connection state and is owned entirely by its caller. When `total` is
/// absent the overall collection size is unknown — it is not implied by the
/// number of items in this page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedResult<T> {
    items: Vec<T>,
    total: Option<u64>,
}

impl<T> PaginatedResult<T> {
    /// Map a raw page into a finished result.
    ///
    /// `total` is copied through unchanged when the server supplied it.
    /// A mapper failure on any row propagates and no result is produced.
    pub fn from_page<R>(
        page: ResponsePage<R>,
        mapper: impl Fn(R) -> Result<T>,
    ) -> Result<Self> {
        let total = page.total;
        let items = page.data.into_iter().map(mapper).collect::<Result<Vec<_>>>()?;
        Ok(Self { items, total })
    }

    /// The mapped items, in server order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the result, yielding the mapped items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Total size of the underlying collection, when known
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for PaginatedResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PaginatedResult<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
