//! # helix-api
//!
//! An async client for the Twitch Helix API, built around a lazy
//! cursor-pagination engine.
//!
//! ## Features
//!
//! - **Single-shot pagination**: fetch one page and get a finished,
//!   mapped [`PaginatedResult`] with the server-reported total.
//! - **Lazy pagination**: walk an entire resource through a resumable
//!   [`Paginator`] that only fetches as you consume, deduplicates rows
//!   repeated across page boundaries, and can be drained, stepped, or
//!   turned into a `Stream`.
//! - **Derived-value caching**: entity collections computed from raw
//!   response rows are built once per instance and reused.
//! - **Static credentials**: a [`StaticAuthProvider`] with strict scope
//!   validation, behind a provider trait you can replace.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use helix_api::{ApiClient, StaticAuthProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> helix_api::Result<()> {
//!     let auth = StaticAuthProvider::new(client_id, access_token, scopes);
//!     let client = ApiClient::new(Arc::new(auth));
//!
//!     // One page, eagerly.
//!     let top = client.games().get_top_games(Default::default()).await?;
//!
//!     // The whole collection, lazily.
//!     let mut paginator = client.games().get_top_games_paginated();
//!     while let Some(game) = paginator.get_next().await? {
//!         println!("{}", game.name());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Authentication providers
pub mod auth;

/// HTTP transport and request descriptors
pub mod http;

/// Single-shot and lazy cursor pagination
pub mod pagination;

/// Per-instance caching for derived values
pub mod cache;

/// Namespaced endpoint groups and entities
pub mod api;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::*;
pub use auth::{AccessToken, AuthProvider, StaticAuthProvider};
pub use cache::Derived;
pub use error::{Error, Result};
pub use http::{ApiClient, ApiRequest, ClientConfig, Query};
pub use pagination::{PageFetcher, PaginatedResult, Pagination, Paginator, ResponsePage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
