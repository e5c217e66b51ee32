use mcp_protocol_sdk::prelude::McpError;
use reqwest::StatusCode;
use thiserror::Error;

use super::request::ToolName;

/// Longest upstream error body kept in a [`UpstreamError::Status`].
pub const BODY_SNIPPET_LIMIT: usize = 512;

/// Why a single upstream GET failed.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid JSON in response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl UpstreamError {
    pub fn status(status: StatusCode, body: String) -> Self {
        let body = match body.char_indices().nth(BODY_SNIPPET_LIMIT) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body,
        };
        UpstreamError::Status { status, body }
    }

    /// Connection failures, timeouts and gateway-style statuses are worth
    /// another attempt. Everything else is assumed permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Network(e) => e.is_timeout() || e.is_connect(),
            UpstreamError::Status { status, .. } => matches!(status.as_u16(), 429 | 502 | 503 | 504),
            UpstreamError::Decode(_) => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{}: {source}", .tool.failure_prefix())]
    Upstream {
        tool: ToolName,
        #[source]
        source: UpstreamError,
    },

    #[error("Missing '{0}' parameter")]
    MissingArgument(&'static str),

    #[error("Invalid '{name}' parameter: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

impl AdapterError {
    pub fn is_upstream(&self) -> bool {
        matches!(self, AdapterError::Upstream { .. })
    }
}

impl From<AdapterError> for McpError {
    fn from(err: AdapterError) -> Self {
        if err.is_upstream() {
            McpError::internal(err.to_string())
        } else {
            McpError::validation(err.to_string())
        }
    }
}
