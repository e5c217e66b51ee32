use std::time::Instant;

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{AdapterConfig, BearerToken, ConfigError, Endpoints, RetryPolicy};

use super::error::{AdapterError, UpstreamError};
use super::request::{ToolName, ToolRequest};

/// Forwards tool calls to the upstream REST API and hands back its JSON.
///
/// Holds no per-request state; one instance is shared by every handler.
#[derive(Debug, Clone)]
pub struct RemoteFetchClient {
    http: Client,
    endpoints: Endpoints,
    token: BearerToken,
    retry: RetryPolicy,
}

impl RemoteFetchClient {
    pub fn new(config: AdapterConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: AdapterConfig) -> Self {
        Self {
            http,
            endpoints: config.endpoints,
            token: config.token,
            retry: config.retry,
        }
    }

    pub async fn fetch_news(&self, topic: &str) -> Result<Value, AdapterError> {
        self.execute(&ToolRequest::news(topic)).await
    }

    pub async fn fetch_url(&self, url: &str) -> Result<Value, AdapterError> {
        self.execute(&ToolRequest::url(url)).await
    }

    pub async fn fetch_search(
        &self,
        query: &str,
        num_results: Option<i64>,
        domain: Option<&str>,
    ) -> Result<Value, AdapterError> {
        self.execute(&ToolRequest::search(query, num_results, domain)).await
    }

    /// The exact URL `request` would be sent to.
    pub fn request_url(&self, request: &ToolRequest) -> Url {
        let mut url = self.endpoints.for_tool(request.tool()).clone();
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        url
    }

    pub async fn execute(&self, request: &ToolRequest) -> Result<Value, AdapterError> {
        request.validate()?;
        let tool = request.tool();
        let url = self.request_url(request);
        debug!(tool = %tool, url = %url, "Sending upstream request");

        let started = Instant::now();
        let result = self.get_json_with_retry(tool, &url).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => info!(tool = %tool, elapsed_ms, "Upstream request succeeded"),
            Err(err) => warn!(tool = %tool, elapsed_ms, error = %err, "Upstream request failed"),
        }
        result.map_err(|source| AdapterError::Upstream { tool, source })
    }

    async fn get_json_with_retry(&self, tool: ToolName, url: &Url) -> Result<Value, UpstreamError> {
        let mut attempt: u32 = 0;
        loop {
            match self.get_json(url).await {
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    attempt += 1;
                    warn!(
                        tool = %tool,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying upstream request"
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }

    async fn get_json(&self, url: &Url) -> Result<Value, UpstreamError> {
        let resp = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .bearer_auth(self.token.expose())
            .send()
            .await
            .map_err(UpstreamError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_else(|e| {
                debug!(status = %status, error = %e, "Could not read upstream error body");
                String::new()
            });
            return Err(UpstreamError::status(status, body));
        }

        let bytes = resp.bytes().await.map_err(UpstreamError::Network)?;
        serde_json::from_slice(&bytes).map_err(UpstreamError::Decode)
    }
}
