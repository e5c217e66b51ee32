use std::fmt;
use std::str::FromStr;

use super::error::AdapterError;

pub const DEFAULT_NUM_RESULTS: i64 = 10;
pub const DEFAULT_DOMAIN: &str = "at";

/// The three upstream-backed tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    FetchNews,
    FetchUrl,
    FetchSearch,
}

impl ToolName {
    pub const ALL: [ToolName; 3] = [ToolName::FetchNews, ToolName::FetchUrl, ToolName::FetchSearch];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::FetchNews => "fetch_news",
            ToolName::FetchUrl => "fetch_url",
            ToolName::FetchSearch => "fetch_search",
        }
    }

    /// Prefix used on every upstream failure reported for this tool.
    pub fn failure_prefix(self) -> &'static str {
        match self {
            ToolName::FetchNews => "Failed to fetch news",
            ToolName::FetchUrl => "Failed to fetch URL",
            ToolName::FetchSearch => "Failed to fetch search results",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}

/// A single upstream call with its arguments resolved.
///
/// Constructors apply the search defaults but do not validate; validation
/// happens in [`ToolRequest::validate`] right before the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    News { topic: String },
    Url { url: String },
    Search { query: String, num_results: i64, domain: String },
}

impl ToolRequest {
    pub fn news(topic: impl Into<String>) -> Self {
        ToolRequest::News { topic: topic.into() }
    }

    pub fn url(url: impl Into<String>) -> Self {
        ToolRequest::Url { url: url.into() }
    }

    pub fn search(query: impl Into<String>, num_results: Option<i64>, domain: Option<&str>) -> Self {
        let domain = domain
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DOMAIN);
        ToolRequest::Search {
            query: query.into(),
            num_results: num_results.unwrap_or(DEFAULT_NUM_RESULTS),
            domain: domain.to_string(),
        }
    }

    pub fn tool(&self) -> ToolName {
        match self {
            ToolRequest::News { .. } => ToolName::FetchNews,
            ToolRequest::Url { .. } => ToolName::FetchUrl,
            ToolRequest::Search { .. } => ToolName::FetchSearch,
        }
    }

    pub fn validate(&self) -> Result<(), AdapterError> {
        let (name, value) = match self {
            ToolRequest::News { topic } => ("topic", topic),
            ToolRequest::Url { url } => ("url", url),
            ToolRequest::Search { query, .. } => ("query", query),
        };
        if value.trim().is_empty() {
            return Err(AdapterError::InvalidArgument {
                name,
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Query parameters in the order the upstream documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            ToolRequest::News { topic } => vec![("topic", topic.clone())],
            ToolRequest::Url { url } => vec![("url", url.clone())],
            ToolRequest::Search { query, num_results, domain } => vec![
                ("query", query.clone()),
                ("num_results", num_results.to_string()),
                ("domain", domain.clone()),
            ],
        }
    }
}
