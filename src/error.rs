//! Error types for the Helix client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Helix client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("token does not have the requested scopes ({}) and can not be upgraded", missing.join(", "))]
    MissingScopes { missing: Vec<String> },

    #[error("endpoint requires an access token but the provider holds none")]
    MissingToken,

    // ============================================================================
    // Mapping Errors
    // ============================================================================
    #[error("failed to map response row: {message}")]
    Mapping { message: String },
}

impl Error {
    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a missing-scopes error
    pub fn missing_scopes(missing: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::MissingScopes {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a row mapping error
    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }
}

/// Result type alias for the Helix client
pub type Result<T> = std::result::Result<T, Error>;
