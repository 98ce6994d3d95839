//! Tests for the pagination module

use super::*;
use crate::error::{Error, Result};
use crate::http::ApiRequest;
use async_trait::async_trait;
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Scripted fetcher
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    id: u32,
}

fn row(id: u32) -> Row {
    Row { id }
}

enum Scripted {
    Page(ResponsePage<Row>),
    Fail(u16),
}

/// Serves a pre-scripted sequence of pages and records the cursor each
/// fetch was made with.
struct ScriptedFetcher {
    script: Mutex<VecDeque<Scripted>>,
    cursors_seen: Mutex<Vec<Option<String>>>,
}

impl ScriptedFetcher {
    fn new(script: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            cursors_seen: Mutex::new(Vec::new()),
        })
    }

    fn cursors_seen(&self) -> Vec<Option<String>> {
        self.cursors_seen.lock().unwrap().clone()
    }

    fn fetch_count(&self) -> usize {
        self.cursors_seen.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher<Row> for ScriptedFetcher {
    async fn fetch_page(&self, request: &ApiRequest) -> Result<ResponsePage<Row>> {
        let cursor = request
            .query_params()
            .get("after")
            .map(|values| values[0].clone());
        self.cursors_seen.lock().unwrap().push(cursor);

        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Page(page)) => Ok(page),
            Some(Scripted::Fail(status)) => Err(Error::http_status(status, "scripted failure")),
            None => panic!("fetcher called more times than scripted"),
        }
    }
}

fn paginator(fetcher: Arc<ScriptedFetcher>) -> Paginator<Row, u32> {
    Paginator::new(
        fetcher,
        ApiRequest::new("items"),
        |row: Row| Ok(row.id),
        |row: &Row| row.id.to_string(),
    )
}

// ============================================================================
// Paginator: ordering and draining
// ============================================================================

#[tokio::test]
async fn test_get_all_yields_pages_in_order() {
    let fetcher = ScriptedFetcher::new(vec![
        Scripted::Page(ResponsePage::new(vec![row(1), row(2)]).with_cursor("a")),
        Scripted::Page(ResponsePage::new(vec![row(3), row(4)]).with_cursor("b")),
        Scripted::Page(ResponsePage::new(vec![row(5)])),
    ]);
    let mut paginator = paginator(fetcher.clone());

    let items = paginator.get_all().await.unwrap();

    assert_eq!(items, vec![1, 2, 3, 4, 5]);
    assert_eq!(
        fetcher.cursors_seen(),
        vec![None, Some("a".to_string()), Some("b".to_string())]
    );
}

#[tokio::test]
async fn test_get_all_after_exhaustion_is_empty() {
    let fetcher = ScriptedFetcher::new(vec![Scripted::Page(ResponsePage::new(vec![row(1)]))]);
    let mut paginator = paginator(fetcher.clone());

    assert_eq!(paginator.get_all().await.unwrap(), vec![1]);
    assert_eq!(paginator.get_all().await.unwrap(), Vec::<u32>::new());
    // The second drain must not go back to the network.
    assert_eq!(fetcher.fetch_count(), 1);
}

#[tokio::test]
async fn test_get_next_fetches_only_when_buffer_runs_out() {
    let fetcher = ScriptedFetcher::new(vec![
        Scripted::Page(ResponsePage::new(vec![row(1), row(2)]).with_cursor("a")),
        Scripted::Page(ResponsePage::new(vec![row(3)])),
    ]);
    let mut paginator = paginator(fetcher.clone());

    assert_eq!(paginator.get_next().await.unwrap(), Some(1));
    assert_eq!(fetcher.fetch_count(), 1);
    assert_eq!(paginator.get_next().await.unwrap(), Some(2));
    assert_eq!(fetcher.fetch_count(), 1);

    assert_eq!(paginator.get_next().await.unwrap(), Some(3));
    assert_eq!(fetcher.fetch_count(), 2);

    assert_eq!(paginator.get_next().await.unwrap(), None);
    assert_eq!(fetcher.fetch_count(), 2);
}

#[tokio::test]
async fn test_into_stream_yields_all_items() {
    let fetcher = ScriptedFetcher::new(vec![
        Scripted::Page(ResponsePage::new(vec![row(1), row(2)]).with_cursor("a")),
        Scripted::Page(ResponsePage::new(vec![row(3)])),
    ]);

    let items: Vec<u32> = paginator(fetcher)
        .into_stream()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(items, vec![1, 2, 3]);
}

// ============================================================================
// Paginator: deduplication
// ============================================================================

#[tokio::test]
async fn test_boundary_row_yields_once() {
    // The concrete two-page scenario: the row with id 2 sits on both sides
    // of the page boundary.
    let fetcher = ScriptedFetcher::new(vec![
        Scripted::Page(
            ResponsePage::new(vec![row(1), row(2)])
                .with_cursor("X")
                .with_total(5),
        ),
        Scripted::Page(ResponsePage::new(vec![row(2), row(3)])),
    ]);
    let mut paginator = paginator(fetcher.clone());

    let items = paginator.get_all().await.unwrap();

    assert_eq!(items, vec![1, 2, 3]);
    assert_eq!(fetcher.cursors_seen(), vec![None, Some("X".to_string())]);
    assert_eq!(paginator.total(), Some(5));
}

#[tokio::test]
async fn test_dedup_removes_without_reordering() {
    let fetcher = ScriptedFetcher::new(vec![
        Scripted::Page(ResponsePage::new(vec![row(1), row(2), row(3)]).with_cursor("a")),
        Scripted::Page(ResponsePage::new(vec![row(3), row(1), row(4)])),
    ]);
    let mut paginator = paginator(fetcher);

    let items = paginator.get_all().await.unwrap();

    assert_eq!(items, vec![1, 2, 3, 4]);
}

// ============================================================================
// Paginator: empty pages
// ============================================================================

#[tokio::test]
async fn test_empty_page_with_fresh_cursor_is_transient() {
    let fetcher = ScriptedFetcher::new(vec![
        Scripted::Page(ResponsePage::<Row>::new(vec![]).with_cursor("skip")),
        Scripted::Page(ResponsePage::new(vec![row(7)])),
    ]);
    let mut paginator = paginator(fetcher.clone());

    assert_eq!(paginator.get_next().await.unwrap(), Some(7));
    assert_eq!(fetcher.cursors_seen(), vec![None, Some("skip".to_string())]);
}

#[tokio::test]
async fn test_empty_page_without_cursor_terminates() {
    let fetcher = ScriptedFetcher::new(vec![Scripted::Page(ResponsePage::<Row>::new(vec![]))]);
    let mut paginator = paginator(fetcher.clone());

    assert_eq!(paginator.get_next().await.unwrap(), None);
    assert!(paginator.is_finished());
    assert_eq!(fetcher.fetch_count(), 1);
}

#[tokio::test]
async fn test_empty_page_repeating_its_cursor_terminates() {
    // A server stuck on one cursor would otherwise loop forever.
    let fetcher = ScriptedFetcher::new(vec![
        Scripted::Page(ResponsePage::<Row>::new(vec![]).with_cursor("x")),
        Scripted::Page(ResponsePage::<Row>::new(vec![]).with_cursor("x")),
    ]);
    let mut paginator = paginator(fetcher.clone());

    assert_eq!(paginator.get_next().await.unwrap(), None);
    assert!(paginator.is_finished());
    assert_eq!(fetcher.fetch_count(), 2);
}

// ============================================================================
// Paginator: failure semantics
// ============================================================================

#[tokio::test]
async fn test_fetch_error_leaves_cursor_unchanged() {
    let fetcher = ScriptedFetcher::new(vec![
        Scripted::Page(ResponsePage::new(vec![row(1)]).with_cursor("x")),
        Scripted::Fail(500),
        Scripted::Page(ResponsePage::new(vec![row(2)])),
    ]);
    let mut paginator = paginator(fetcher.clone());

    assert_eq!(paginator.get_next().await.unwrap(), Some(1));

    let err = paginator.get_next().await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    assert_eq!(paginator.current_cursor(), Some("x"));

    // Retrying re-attempts the same page.
    assert_eq!(paginator.get_next().await.unwrap(), Some(2));
    assert_eq!(
        fetcher.cursors_seen(),
        vec![None, Some("x".to_string()), Some("x".to_string())]
    );
}

#[tokio::test]
async fn test_mapping_error_leaves_state_unchanged() {
    let fetcher = ScriptedFetcher::new(vec![
        Scripted::Page(ResponsePage::new(vec![row(1)]).with_cursor("x")),
        Scripted::Page(ResponsePage::new(vec![row(13), row(2)])),
        Scripted::Page(ResponsePage::new(vec![row(13), row(2)])),
    ]);

    let fail_once = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&fail_once);
    let mut paginator = Paginator::new(
        fetcher.clone(),
        ApiRequest::new("items"),
        move |row: Row| {
            if row.id == 13 && flag.swap(false, Ordering::SeqCst) {
                Err(Error::mapping("corrupt row"))
            } else {
                Ok(row.id)
            }
        },
        |row: &Row| row.id.to_string(),
    );

    assert_eq!(paginator.get_next().await.unwrap(), Some(1));

    let err = paginator.get_next().await.unwrap_err();
    assert!(matches!(err, Error::Mapping { .. }));
    assert_eq!(paginator.current_cursor(), Some("x"));

    // The retry re-fetches the same page and yields every row of it.
    assert_eq!(paginator.get_next().await.unwrap(), Some(13));
    assert_eq!(paginator.get_next().await.unwrap(), Some(2));
    assert_eq!(paginator.get_next().await.unwrap(), None);
    assert_eq!(
        fetcher.cursors_seen(),
        vec![None, Some("x".to_string()), Some("x".to_string())]
    );
}

// ============================================================================
// Paginator: state accessors and resumption
// ============================================================================

#[tokio::test]
async fn test_cursor_state_accessors() {
    let fetcher = ScriptedFetcher::new(vec![
        Scripted::Page(ResponsePage::new(vec![row(1)]).with_cursor("a")),
        Scripted::Page(ResponsePage::new(vec![row(2)])),
    ]);
    let mut paginator = paginator(fetcher);

    assert_eq!(paginator.current_cursor(), None);
    assert!(!paginator.is_finished());
    assert_eq!(paginator.total(), None);

    paginator.get_next().await.unwrap();
    assert_eq!(paginator.current_cursor(), Some("a"));

    paginator.get_all().await.unwrap();
    assert!(paginator.is_finished());
    assert_eq!(paginator.current_cursor(), None);
}

#[tokio::test]
async fn test_starting_after_resumes_from_cursor() {
    let fetcher = ScriptedFetcher::new(vec![Scripted::Page(ResponsePage::new(vec![row(9)]))]);
    let mut paginator = paginator(fetcher.clone()).starting_after("resume");

    assert_eq!(paginator.get_all().await.unwrap(), vec![9]);
    assert_eq!(fetcher.cursors_seen(), vec![Some("resume".to_string())]);
}

// ============================================================================
// PaginatedResult
// ============================================================================

#[test]
fn test_paginated_result_copies_total_through() {
    let page = ResponsePage::new(vec![row(1), row(2)])
        .with_cursor("X")
        .with_total(5);

    let result = PaginatedResult::from_page(page, |row| Ok(row.id)).unwrap();

    assert_eq!(result.items(), &[1, 2]);
    assert_eq!(result.total(), Some(5));
    assert_eq!(result.len(), 2);
    assert!(!result.is_empty());
}

#[test]
fn test_paginated_result_total_unknown_when_absent() {
    let page = ResponsePage::new(vec![row(1)]);
    let result = PaginatedResult::from_page(page, |row| Ok(row.id)).unwrap();

    // A missing total means unknown, not "length of this page".
    assert_eq!(result.total(), None);
}

#[test]
fn test_paginated_result_propagates_mapper_error() {
    let page = ResponsePage::new(vec![row(1), row(13)]);

    let result = PaginatedResult::from_page(page, |row| {
        if row.id == 13 {
            Err(Error::mapping("corrupt row"))
        } else {
            Ok(row.id)
        }
    });

    assert!(matches!(result, Err(Error::Mapping { .. })));
}

#[test]
fn test_paginated_result_iteration() {
    let page = ResponsePage::new(vec![row(1), row(2)]);
    let result = PaginatedResult::from_page(page, |row| Ok(row.id)).unwrap();

    let borrowed: Vec<u32> = (&result).into_iter().copied().collect();
    assert_eq!(borrowed, vec![1, 2]);

    let owned: Vec<u32> = result.into_iter().collect();
    assert_eq!(owned, vec![1, 2]);
}

// ============================================================================
// Response envelope
// ============================================================================

#[test]
fn test_response_page_cursor_filters_empty() {
    let page = ResponsePage::new(vec![row(1)]).with_cursor("abc");
    assert_eq!(page.cursor(), Some("abc"));

    let page = ResponsePage::new(vec![row(1)]).with_cursor("");
    assert_eq!(page.cursor(), None);

    let page = ResponsePage::new(vec![row(1)]);
    assert_eq!(page.cursor(), None);
}

#[test]
fn test_response_page_deserializes_envelope() {
    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct WireRow {
        id: String,
    }

    let page: ResponsePage<WireRow> = serde_json::from_value(serde_json::json!({
        "data": [{"id": "1"}, {"id": "2"}],
        "pagination": {"cursor": "X"},
        "total": 5
    }))
    .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.cursor(), Some("X"));
    assert_eq!(page.total, Some(5));

    // Exhausted responses drop the pagination object entirely.
    let page: ResponsePage<WireRow> = serde_json::from_value(serde_json::json!({
        "data": []
    }))
    .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.cursor(), None);
    assert_eq!(page.total, None);
}

// ============================================================================
// Pagination filter
// ============================================================================

#[test]
fn test_pagination_filter_renders_query() {
    let query = Pagination::new().after("abc").limit(25).to_query();

    let pairs: Vec<(&str, &str)> = query.pairs().collect();
    assert_eq!(pairs, vec![("after", "abc"), ("first", "25")]);
}

#[test]
fn test_pagination_filter_before() {
    let query = Pagination::new().before("xyz").to_query();

    let pairs: Vec<(&str, &str)> = query.pairs().collect();
    assert_eq!(pairs, vec![("before", "xyz")]);
}

#[test]
fn test_empty_pagination_filter_renders_nothing() {
    assert!(Pagination::new().to_query().is_empty());
}
