use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use simpleapi_mcp::config::Config;
use simpleapi_mcp::{RemoteFetchClient, environment, logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    environment::load_env();
    logging::init_from_env();

    let config = Config::load_default();
    let adapter_config = config
        .adapter_config(environment::get_bearer_token(&config))
        .context("invalid upstream configuration")?;
    info!(
        news = %adapter_config.endpoints.news,
        render = %adapter_config.endpoints.render,
        search = %adapter_config.endpoints.search,
        timeout_secs = adapter_config.timeout.as_secs(),
        max_retries = adapter_config.retry.max_retries,
        "Upstream configured"
    );

    let client = Arc::new(RemoteFetchClient::new(adapter_config).context("failed to build upstream client")?);
    server::run(client, &config).await
}
