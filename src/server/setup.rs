use mcp_protocol_sdk::prelude::ToolHandler;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::adapter::{RemoteFetchClient, ToolName};
use crate::config::Config;
use crate::{
    FetchNewsHandler,
    FetchSearchHandler,
    FetchUrlHandler,
    ToolMeta,
    ToolsMeta,
    fetch_news_meta,
    fetch_search_meta,
    fetch_url_meta,
};

use super::state::AppState;

fn tool_entry(
    tool: ToolName,
    client: &Arc<RemoteFetchClient>,
) -> (ToolMeta, Arc<dyn ToolHandler + Send + Sync>) {
    let client = Arc::clone(client);
    match tool {
        ToolName::FetchNews => (
            fetch_news_meta(),
            Arc::new(FetchNewsHandler { client }) as Arc<dyn ToolHandler + Send + Sync>,
        ),
        ToolName::FetchUrl => (
            fetch_url_meta(),
            Arc::new(FetchUrlHandler { client }) as Arc<dyn ToolHandler + Send + Sync>,
        ),
        ToolName::FetchSearch => (
            fetch_search_meta(),
            Arc::new(FetchSearchHandler { client }) as Arc<dyn ToolHandler + Send + Sync>,
        ),
    }
}

pub fn build_state(client: Arc<RemoteFetchClient>, config: &Config) -> AppState {
    let mut metas = Vec::new();
    let mut handlers: HashMap<String, Arc<dyn ToolHandler + Send + Sync>> = HashMap::new();

    for tool in ToolName::ALL {
        if !config.is_enabled(tool.as_str()) {
            info!(tool = %tool, "Tool disabled by config");
            continue;
        }
        let (meta, handler) = tool_entry(tool, &client);
        metas.push(meta);
        handlers.insert(tool.as_str().to_string(), handler);
    }

    AppState {
        tools_meta: ToolsMeta(metas),
        handlers,
    }
}
