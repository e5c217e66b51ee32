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
            "topic": { "type": "string", "description": "The topic to search for in news articles." }
        });
        let schema = ToolInputSchema::new("object", properties, vec!["topic".to_string()]);
        ToolMeta::new(
            "fetch_news",
            "Fetch News",
            "Fetch news articles related to a specific topic from the API.",
            schema,
        )
    })
    .clone()
}

pub struct FetchNewsHandler {
    pub client: Arc<RemoteFetchClient>,
}

#[async_trait]
impl ToolHandler for FetchNewsHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> McpResult<ToolResult> {
        let topic = required_str_arg(&arguments, "topic")?;
        let body = self.client.fetch_news(&topic).await?;
        Ok(json_tool_result(body))
    }
}
