//! HTTP transport module
//!
//! [`ApiRequest`] describes a single endpoint call; [`ApiClient`] executes
//! it with authentication applied. The pagination engine talks to the
//! client exclusively through the [`crate::pagination::PageFetcher`]
//! boundary implemented here.

mod client;
mod request;

pub use client::{ApiClient, ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use request::{ApiRequest, Query};
