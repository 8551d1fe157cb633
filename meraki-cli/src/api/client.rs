//! HTTP client for the Meraki Dashboard API

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::ACCEPT;

use super::constants::{API_KEY_HEADER, USER_AGENT};
use super::models::{NetworkContext, RemoteNetworkObject, RemoteNetworkObjectGroup};
use super::operations::{Operation, OperationResult};

/// Transport seam between the provisioning pipeline and the Dashboard API.
///
/// `execute` only fails on transport problems (connection refused, body
/// unreadable). Any HTTP status, including errors, comes back as an
/// [`OperationResult`] so callers can decide what counts as failure.
#[async_trait]
pub trait MerakiApi: Send + Sync {
    async fn execute(&self, operation: &Operation) -> Result<OperationResult>;
}

/// reqwest-backed [`MerakiApi`] implementation
pub struct MerakiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MerakiClient {
    /// Create a client for `base_url`.
    ///
    /// No timeout is applied unless one is given; a hung request then blocks
    /// the run.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn from_context(
        ctx: &NetworkContext,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        Self::new(base_url, ctx.api_key.clone(), timeout)
    }

    /// Absolute URL for an operation path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl MerakiApi for MerakiClient {
    async fn execute(&self, operation: &Operation) -> Result<OperationResult> {
        let url = self.url(&operation.path());
        let method = match operation.http_method() {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            other => bail!("Unsupported HTTP method: {}", other),
        };

        log::debug!("{} {}", method, url);
        if let Some(body) = operation.body() {
            log::debug!(
                "Request body: {}",
                serde_json::to_string_pretty(body).unwrap_or_default()
            );
        }

        let mut request = self
            .http
            .request(method, &url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json");
        if let Some(body) = operation.body() {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status_code = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;

        log::debug!("{} {} -> {}", operation.http_method(), url, status_code);

        Ok(OperationResult::new(operation.clone(), status_code, body))
    }
}

/// Fetch the organization's current network objects
pub async fn list_network_objects(
    api: &dyn MerakiApi,
    ctx: &NetworkContext,
) -> Result<Vec<RemoteNetworkObject>> {
    let result = api.execute(&Operation::list_network_objects(ctx)).await?;
    if result.is_error() {
        bail!(
            "Listing network objects failed with HTTP {}: {}",
            result.status_code,
            result.body
        );
    }
    serde_json::from_str(&result.body).context("Failed to parse network object list")
}

/// Fetch the organization's current network object groups
pub async fn list_network_object_groups(
    api: &dyn MerakiApi,
    ctx: &NetworkContext,
) -> Result<Vec<RemoteNetworkObjectGroup>> {
    let result = api
        .execute(&Operation::list_network_object_groups(ctx))
        .await?;
    if result.is_error() {
        bail!(
            "Listing network object groups failed with HTTP {}: {}",
            result.status_code,
            result.body
        );
    }
    serde_json::from_str(&result.body).context("Failed to parse network object group list")
}
