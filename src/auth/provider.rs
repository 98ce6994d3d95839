//! Auth provider trait and the static-credential implementation
//!
//! The transport asks its provider for a token before every call. Providers
//! that manage refresh flows can implement [`AuthProvider`] themselves; the
//! built-in [`StaticAuthProvider`] always hands out the same initially given
//! credentials and rejects any scope it was not constructed with.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::fmt;

/// An OAuth access token together with the scopes it carries.
#[derive(Clone)]
pub struct AccessToken {
    access_token: String,
    scopes: Vec<String>,
}

impl AccessToken {
    /// Create a token with the given scope set
    pub fn new(access_token: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            access_token: access_token.into(),
            scopes,
        }
    }

    /// The raw token value
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The scopes the token was issued with
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

// Token value is a credential; keep it out of logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Supplies credentials to the transport.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The application client ID
    fn client_id(&self) -> &str;

    /// The scopes currently available through this provider
    fn current_scopes(&self) -> &[String];

    /// Retrieve an access token covering the requested scopes.
    ///
    /// Returns `Ok(None)` when the provider holds no token and the request
    /// needs none. Fails with [`Error::MissingScopes`] when any requested
    /// scope is not available.
    async fn get_token(&self, scopes: &[String]) -> Result<Option<AccessToken>>;
}

/// An auth provider that always returns the same initially given credentials.
///
/// The scope set is fixed at construction. Requesting a scope outside that
/// set fails immediately; a static credential can not be upgraded, so plan
/// ahead and supply a token that covers every scope you will need.
#[derive(Debug, Clone)]
pub struct StaticAuthProvider {
    client_id: String,
    token: Option<AccessToken>,
    scopes: Vec<String>,
}

impl StaticAuthProvider {
    /// Create a provider with static credentials
    pub fn new(
        client_id: impl Into<String>,
        access_token: impl Into<String>,
        scopes: Vec<String>,
    ) -> Self {
        let token = AccessToken::new(access_token, scopes.clone());
        Self {
            client_id: client_id.into(),
            token: Some(token),
            scopes,
        }
    }

    /// Create a provider that has a client ID but no user token
    pub fn without_token(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            token: None,
            scopes: Vec::new(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn current_scopes(&self) -> &[String] {
        &self.scopes
    }

    async fn get_token(&self, scopes: &[String]) -> Result<Option<AccessToken>> {
        let missing: Vec<String> = scopes
            .iter()
            .filter(|scope| !self.scopes.contains(scope))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingScopes { missing });
        }

        Ok(self.token.clone())
    }
}
