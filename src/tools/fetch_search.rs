use async_trait::async_trait;
use mcp_protocol_sdk::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::adapter::{DEFAULT_DOMAIN, DEFAULT_NUM_RESULTS, RemoteFetchClient};
use super::meta::{ToolInputSchema, ToolMeta};
use super::utils::{json_tool_result, optional_int_arg, optional_str_arg, required_str_arg};

static META: OnceLock<ToolMeta> = OnceLock::new();

pub fn meta() -> ToolMeta {
    META.get_or_init(|| {
        let properties = serde_json::json!({
            "query": { "type": "string", "description": "The search query." },
            "num_results": { "type": "integer", "default": DEFAULT_NUM_RESULTS, "description": "Number of results to request." },
            "domain": { "type": "string", "default": DEFAULT_DOMAIN, "description": "Region/domain code for the search, e.g. 'at' or 'de'." }
        });
        let schema = ToolInputSchema::new("object", properties, vec!["query".to_string()]);
        ToolMeta::new(
            "fetch_search",
            "Fetch Search",
            "Search the web through the API and return the raw JSON results.",
            schema,
        )
    })
    .clone()
}

pub struct FetchSearchHandler {
    pub client: Arc<RemoteFetchClient>,
}

#[async_trait]
impl ToolHandler for FetchSearchHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> McpResult<ToolResult> {
        let query = required_str_arg(&arguments, "query")?;
        let num_results = optional_int_arg(&arguments, "num_results")?;
        let domain = optional_str_arg(&arguments, "domain")?;
        let body = self
            .client
            .fetch_search(&query, num_results, domain.as_deref())
            .await?;
        Ok(json_tool_result(body))
    }
}
