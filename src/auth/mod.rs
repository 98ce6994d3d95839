//! Authentication module
//!
//! Defines the [`AuthProvider`] boundary the transport authenticates
//! through, plus [`StaticAuthProvider`] for fixed credentials. Scope
//! validation is a plain set-membership check against the scopes the
//! credential was constructed with.

mod provider;

pub use provider::{AccessToken, AuthProvider, StaticAuthProvider};
