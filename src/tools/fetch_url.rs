use async_trait::async_trait;
use mcp_protocol_sdk::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::adapter::RemoteFetchClient;
use super::meta::{ToolInputSchema, ToolMeta};
use super::utils::{json_tool_result, required_str_arg};

static META: OnceLock<ToolMeta> = OnceLock::new();

pub fn meta() -> ToolMeta {
    META.get_or_init(|| {
        let properties = serde_json::json!({
            "url": { "type": "string", "description": "The URL to fetch content from." }
        });
        let schema = ToolInputSchema::new("object", properties, vec!["url".to_string()]);
        ToolMeta::new(
            "fetch_url",
            "Fetch URL",
            "Fetch content from a given URL using the w3m rendering API.",
            schema,
        )
    })
    .clone()
}

pub struct FetchUrlHandler {
    pub client: Arc<RemoteFetchClient>,
}

#[async_trait]
impl ToolHandler for FetchUrlHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> McpResult<ToolResult> {
        let url = required_str_arg(&arguments, "url")?;
        let body = self.client.fetch_url(&url).await?;
        Ok(json_tool_result(body))
    }
}
