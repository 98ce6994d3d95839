//! Authenticated HTTP transport
//!
//! [`ApiClient`] issues one GET per [`ApiRequest`]: it resolves a token for
//! the endpoint's scope through the configured [`AuthProvider`], attaches
//! the `Client-ID` and `Authorization` headers, and deserializes the JSON
//! body. It does not retry and does not rate-limit; errors surface to the
//! caller unchanged.

use crate::api::{BitsApi, ExtensionsApi, GamesApi, UsersApi};
use crate::auth::AuthProvider;
use crate::error::{Error, Result};
use crate::pagination::{PageFetcher, ResponsePage};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::request::ApiRequest;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.twitch.tv/helix/";

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all request paths are resolved against
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("helix-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for the client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    auth: Arc<dyn AuthProvider>,
}

/// The Helix API client.
///
/// Cheaply cloneable; clones share the same connection pool and auth
/// provider, which is how the shared handle reaches entities that carry
/// one for late-bound fetches.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl ApiClient {
    /// Create a client with default configuration
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_config(ClientConfig::default(), auth)
            .expect("default client configuration is valid")
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig, auth: Arc<dyn AuthProvider>) -> Result<Self> {
        let mut base = config.base_url.clone();
        // Url::join treats a base without a trailing slash as a file and
        // would drop its last path segment.
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                auth,
            }),
        })
    }

    /// The configured auth provider
    pub fn auth_provider(&self) -> &Arc<dyn AuthProvider> {
        &self.inner.auth
    }

    /// Call an endpoint and deserialize its JSON response.
    ///
    /// Resolves a token for the request's scope first, so a scope mismatch
    /// fails before any network traffic.
    pub async fn call<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let url = self
            .inner
            .base_url
            .join(request.path().trim_start_matches('/'))?;

        let scopes: Vec<String> = request
            .required_scope()
            .map(|scope| vec![scope.to_string()])
            .unwrap_or_default();
        let token = self.inner.auth.get_token(&scopes).await?;
        if token.is_none() && !scopes.is_empty() {
            return Err(Error::MissingToken);
        }

        let mut req = self
            .inner
            .http
            .get(url)
            .header("Client-ID", self.inner.auth.client_id());
        if let Some(token) = &token {
            req = req.bearer_auth(token.access_token());
        }

        let pairs: Vec<(&str, &str)> = request.query_params().pairs().collect();
        if !pairs.is_empty() {
            req = req.query(&pairs);
        }

        debug!(path = request.path(), "calling endpoint");
        let response = req.send().await.map_err(Error::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(Error::Http)
    }

    // ========================================================================
    // Namespaced endpoint groups
    // ========================================================================

    /// The API methods that deal with games
    pub fn games(&self) -> GamesApi {
        GamesApi::new(self.clone())
    }

    /// The API methods that deal with bits
    pub fn bits(&self) -> BitsApi {
        BitsApi::new(self.clone())
    }

    /// The API methods that deal with extensions
    pub fn extensions(&self) -> ExtensionsApi {
        ExtensionsApi::new(self.clone())
    }

    /// The API methods that deal with users
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("client_id", &self.inner.auth.client_id())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<R> PageFetcher<R> for ApiClient
where
    R: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, request: &ApiRequest) -> Result<ResponsePage<R>> {
        self.call(request).await
    }
}
