//! MCP stdio server that exposes a remote news, URL-render and search API
//! as tools, plus a static `info://api_version` resource.

pub mod adapter;
pub mod config;
pub mod environment;
pub mod logging;
pub mod resources;
pub mod server;
pub mod tools;

pub use adapter::{AdapterError, RemoteFetchClient, ToolName, ToolRequest, UpstreamError};
pub use config::{AdapterConfig, BearerToken, Config, ConfigError, RetryPolicy};
pub use resources::get_api_version;
pub use tools::{
	FetchNewsHandler,
	FetchSearchHandler,
	FetchUrlHandler,
	ToolMeta,
	ToolsMeta,
	fetch_news_meta,
	fetch_search_meta,
	fetch_url_meta,
};
