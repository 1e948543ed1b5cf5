//! HTTP transport for the Yahoo Fantasy Sports API.
//!
//! The rest of the crate depends only on the [`Transport`] trait: one
//! endpoint descriptor in, one fully parsed response tree out. How the call
//! is authenticated or pooled lives entirely behind it.

use std::future::Future;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;

use crate::error::Result;

pub mod parse;


/// Base path for the Yahoo Fantasy Sports v2 API.
pub const FANTASY_BASE_URL: &str = "https://fantasysports.yahooapis.com/fantasy/v2";

/// A remote resource to fetch: a path-like identifier plus optional
/// query-style parameters.
///
/// Paths follow Yahoo's resource hierarchy, e.g. `league/{key}/teams` or
/// `team/{key}/roster;week=3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    params: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Remote transport collaborator: performs one remote call per invocation
/// and returns the parsed response tree. No retries, no in-flight
/// de-duplication; timeouts are the implementation's concern.
pub trait Transport {
    fn get(&self, endpoint: &Endpoint) -> impl Future<Output = Result<Value>> + Send;
}

impl<T: Transport + Sync> Transport for std::sync::Arc<T> {
    fn get(&self, endpoint: &Endpoint) -> impl Future<Output = Result<Value>> + Send {
        (**self).get(endpoint)
    }
}

/// Build an `Authorization: Bearer` header map from `YAHOO_ACCESS_TOKEN`,
/// if present.
///
/// Returns `Ok(None)` when the env var is missing (public resources).
pub fn maybe_auth_header_map() -> Result<Option<HeaderMap>> {
    match std::env::var(crate::ACCESS_TOKEN_ENV_VAR) {
        Ok(token) => {
            let mut h = HeaderMap::new();
            h.insert(ACCEPT, HeaderValue::from_static("application/json"));
            h.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
            Ok(Some(h))
        }
        Err(_) => Ok(None),
    }
}

/// reqwest-backed [`Transport`] against the Yahoo v2 API.
///
/// The `format=json` parameter is always sent; Yahoo otherwise answers with
/// the raw XML the JSON is converted from.
pub struct YahooTransport {
    client: Client,
    base_url: String,
}

impl YahooTransport {
    pub fn new() -> Result<Self> {
        Self::with_base_url(FANTASY_BASE_URL)
    }

    /// Point the transport at a different base URL (test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent("yahoo-fantasy/0.1").build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl Transport for YahooTransport {
    async fn get(&self, endpoint: &Endpoint) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, endpoint.path());
        let headers = maybe_auth_header_map()?.unwrap_or_default();

        let res = self
            .client
            .get(&url)
            .headers(headers)
            .query(&[("format", "json")])
            .query(&endpoint.params)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(res)
    }
}
