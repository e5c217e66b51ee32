use anyhow::Result;
use jsonrpc_v2::{Data, MapRouter, Server};
use std::io;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

use crate::adapter::RemoteFetchClient;
use crate::config::Config;

use super::rpc;
use super::setup::build_state;
use super::state::AppState;

pub fn build_server(client: Arc<RemoteFetchClient>, config: &Config) -> Arc<Server<MapRouter>> {
    build_server_with_state(build_state(client, config))
}

pub fn build_server_with_state(state: AppState) -> Arc<Server<MapRouter>> {
    Server::new()
        .with_data(Data::new(state))
        .with_method("initialize", rpc::initialize)
        .with_method("notifications/initialized", rpc::initialized)
        .with_method("ping", rpc::ping)
        .with_method("tools/list", rpc::tools_list)
        .with_method("tools/call", rpc::tools_call)
        .with_method("resources/list", rpc::resources_list)
        .with_method("resources/read", rpc::resources_read)
        .finish()
}

pub async fn run(client: Arc<RemoteFetchClient>, config: &Config) -> Result<()> {
    let server = build_server(client, config);
    run_with_server(server).await
}

pub async fn run_with_server(server: Arc<Server<MapRouter>>) -> Result<()> {
    info!("Serving MCP over stdio");
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = io::stdout();
    crate::server::io::run_with_io(server, stdin, stdout).await
}
