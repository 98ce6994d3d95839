//! The lazy multi-page cursor walk
//!
//! A [`Paginator`] exposes a resource as a sequence that issues further
//! network calls only when the caller consumes past the buffered items.
//! Each fetch derives a request from the immutable base descriptor plus the
//! current cursor, maps the raw rows into domain values, drops rows whose
//! dedup key was already seen (servers occasionally repeat a boundary row
//! across adjacent pages), and advances the cursor. Exhaustion is terminal.

use super::page::ResponsePage;
use crate::error::Result;
use crate::http::ApiRequest;
use async_trait::async_trait;
use futures::stream::{self, Stream};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Fetches one raw page for a request descriptor.
///
/// This is the paginator's only view of the transport. Fetch failures
/// propagate verbatim; the boundary does no retrying of its own, and the
/// paginator relies on fetches for the same descriptor being idempotent.
#[async_trait]
pub trait PageFetcher<R>: Send + Sync {
    /// Fetch the page the descriptor points at
    async fn fetch_page(&self, request: &ApiRequest) -> Result<ResponsePage<R>>;
}

/// Maps one raw row into a domain value
pub type RowMapper<R, T> = Arc<dyn Fn(R) -> Result<T> + Send + Sync>;

/// Extracts the stable identifier used to spot repeated boundary rows
pub type RowKey<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Where the walk currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState {
    /// No page fetched yet
    Start,
    /// Next fetch continues after this cursor
    At(String),
    /// The server stopped issuing cursors; the walk is over for good
    Finished,
}

/// A resumable, lazily advancing walk over a cursor-paginated resource.
///
/// Designed for a single owner driving it sequentially: the advancing
/// operations take `&mut self`, so two callers cannot interleave on one
/// instance. Independent paginators over the same resource share nothing.
pub struct Paginator<R, T> {
    fetcher: Arc<dyn PageFetcher<R>>,
    request: ApiRequest,
    mapper: RowMapper<R, T>,
    key_of: RowKey<R>,
    cursor: CursorState,
    seen: HashSet<String>,
    buffer: VecDeque<T>,
    total: Option<u64>,
}

impl<R, T> Paginator<R, T> {
    /// Create a paginator over the given base request.
    ///
    /// `mapper` turns each raw row into a domain value; `key_of` derives the
    /// dedup key (typically the entity ID) from a raw row.
    pub fn new(
        fetcher: Arc<dyn PageFetcher<R>>,
        request: ApiRequest,
        mapper: impl Fn(R) -> Result<T> + Send + Sync + 'static,
        key_of: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            fetcher,
            request,
            mapper: Arc::new(mapper),
            key_of: Arc::new(key_of),
            cursor: CursorState::Start,
            seen: HashSet::new(),
            buffer: VecDeque::new(),
            total: None,
        }
    }

    /// Resume a walk from a previously observed cursor
    #[must_use]
    pub fn starting_after(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = CursorState::At(cursor.into());
        self
    }

    /// The cursor the next fetch would continue after, if the walk has one
    pub fn current_cursor(&self) -> Option<&str> {
        match &self.cursor {
            CursorState::At(cursor) => Some(cursor),
            CursorState::Start | CursorState::Finished => None,
        }
    }

    /// Whether the walk has permanently ended
    pub fn is_finished(&self) -> bool {
        self.cursor == CursorState::Finished && self.buffer.is_empty()
    }

    /// Total size of the underlying collection, as last reported by the server
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Yield the next item, fetching further pages as needed.
    ///
    /// Returns `Ok(None)` only once the walk is terminal and the buffer is
    /// drained. On a fetch or mapping failure the cursor, dedup set, and
    /// buffer are left exactly as they were, so calling again re-attempts
    /// the same page.
    pub async fn get_next(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.cursor == CursorState::Finished {
                return Ok(None);
            }
            self.fetch_more().await?;
        }
    }

    /// Drain every remaining item into a single ordered sequence.
    ///
    /// Single-pass: once drained the paginator is terminal and a second
    /// call returns an empty vector.
    pub async fn get_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.get_next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Consume the paginator into a lazy stream of items.
    ///
    /// Pages are fetched only as the stream is polled past the buffered
    /// items; dropping the stream abandons the walk.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>>
    where
        R: 'static,
        T: 'static,
    {
        stream::try_unfold(self, |mut paginator| async move {
            let item = paginator.get_next().await?;
            Ok(item.map(|item| (item, paginator)))
        })
    }

    /// Fetch the page at the current cursor and buffer its surviving rows.
    ///
    /// State is only touched after the whole page has been mapped, so any
    /// error leaves the paginator where it was.
    async fn fetch_more(&mut self) -> Result<()> {
        let request = match &self.cursor {
            CursorState::Start => self.request.clone(),
            CursorState::At(cursor) => self.request.with_cursor(cursor),
            CursorState::Finished => return Ok(()),
        };

        debug!(
            path = request.path(),
            cursor = self.current_cursor().unwrap_or("<start>"),
            "fetching next page"
        );
        let page = self.fetcher.fetch_page(&request).await?;

        let next_cursor = page.cursor().map(str::to_owned);
        let total = page.total;
        let row_count = page.data.len();

        let mut mapped = Vec::with_capacity(row_count);
        for row in page.data {
            let key = (self.key_of)(&row);
            let item = (self.mapper)(row)?;
            mapped.push((key, item));
        }

        // Mapping succeeded for the whole page; commit.
        if let Some(total) = total {
            self.total = Some(total);
        }
        for (key, item) in mapped {
            if self.seen.insert(key) {
                self.buffer.push_back(item);
            } else {
                trace!("skipping row repeated across page boundary");
            }
        }

        // An empty page that carries a fresh cursor is transient (some
        // backends emit empty intermediate pages); an empty page that
        // repeats the cursor it was fetched with would loop forever and
        // reads as exhaustion instead.
        let repeated = row_count == 0 && self.current_cursor() == next_cursor.as_deref();
        self.cursor = match next_cursor {
            Some(cursor) if !repeated => CursorState::At(cursor),
            _ => CursorState::Finished,
        };

        Ok(())
    }
}

impl<R, T> fmt::Debug for Paginator<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("request", &self.request)
            .field("cursor", &self.cursor)
            .field("buffered", &self.buffer.len())
            .field("seen", &self.seen.len())
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}
