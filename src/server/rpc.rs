use jsonrpc_v2::{Data, Error as RpcError, Params};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::resources;

use super::error::{ToRpcError, invalid_params, resource_not_found, tool_not_found};
use super::state::{AppState, CallParams, ReadResourceParams};

pub const PROTOCOL_VERSION: &str = "2025-06-18";
pub const SERVER_NAME: &str = "SimpleAPI";

pub async fn initialize(
    _: Params<serde_json::Value>,
    _data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    Ok(json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "listChanged": false }
        }
    }))
}

pub async fn initialized(
    _: Params<serde_json::Value>,
    _data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    debug!("Client finished initialization");
    Ok(serde_json::Value::Null)
}

pub async fn ping(
    _: Params<serde_json::Value>,
    _data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    Ok(json!({}))
}

pub async fn tools_list(
    _: Params<serde_json::Value>,
    data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    Ok(json!({ "tools": &data.tools_meta.0 }))
}

pub async fn tools_call(
    params: Params<CallParams>,
    data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    let CallParams { name, arguments } = params.0;
    if name.is_empty() {
        return Err(invalid_params("Missing 'name' in params"));
    }

    let Some(handler) = data.handlers.get(&name) else {
        warn!(tool = %name, "Call to unknown tool");
        return Err(tool_not_found(&name));
    };

    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    let arg_map: HashMap<String, serde_json::Value> = serde_json::from_value(arguments)
        .map_err(|e| invalid_params(format!("Invalid 'arguments': {e}")))?;

    debug!(tool = %name, "Dispatching tool call");
    let result = handler.call(arg_map).await.map_err(ToRpcError::to_rpc_error)?;
    serde_json::to_value(result).map_err(|e| RpcError::internal(e.to_string()))
}

pub async fn resources_list(
    _: Params<serde_json::Value>,
    _data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    Ok(json!({ "resources": resources::list() }))
}

pub async fn resources_read(
    params: Params<ReadResourceParams>,
    _data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    let ReadResourceParams { uri } = params.0;
    match resources::read(&uri) {
        Some(contents) => Ok(json!({ "contents": [contents] })),
        None => Err(resource_not_found(&uri)),
    }
}
