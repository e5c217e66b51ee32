use jsonrpc_v2::Error as RpcError;
use mcp_protocol_sdk::McpError;

pub const INVALID_PARAMS: i64 = -32602;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const RESOURCE_NOT_FOUND: i64 = -32002;
pub const INTERNAL_ERROR: i64 = -32603;

fn full(code: i64, message: &str, data: String) -> RpcError {
    RpcError::Full {
        code,
        message: message.to_string(),
        data: Some(Box::new(data)),
    }
}

pub fn invalid_params(detail: impl Into<String>) -> RpcError {
    full(INVALID_PARAMS, "Invalid params", detail.into())
}

pub fn tool_not_found(name: &str) -> RpcError {
    full(METHOD_NOT_FOUND, "Tool not found", name.to_string())
}

pub fn resource_not_found(uri: &str) -> RpcError {
    full(RESOURCE_NOT_FOUND, "Resource not found", uri.to_string())
}

pub trait ToRpcError {
    fn to_rpc_error(self) -> RpcError;
}

impl ToRpcError for McpError {
    fn to_rpc_error(self) -> RpcError {
        match self {
            McpError::Validation(msg) => full(INVALID_PARAMS, "Validation error", msg),
            McpError::ToolNotFound(msg) => full(METHOD_NOT_FOUND, "Tool not found", msg),
            McpError::ResourceNotFound(msg) => full(RESOURCE_NOT_FOUND, "Resource not found", msg),
            McpError::Internal(msg) => full(INTERNAL_ERROR, "Internal error", msg),
            other => full(INTERNAL_ERROR, "Internal error", other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of(err: RpcError) -> i64 {
        match err {
            RpcError::Full { code, .. } => code,
            RpcError::Provided { code, .. } => code,
        }
    }

    #[test]
    fn validation_maps_to_invalid_params() {
        let err = McpError::validation("Missing 'topic' parameter".to_string()).to_rpc_error();
        assert_eq!(code_of(err), INVALID_PARAMS);
    }

    #[test]
    fn internal_maps_to_internal_error() {
        let err = McpError::internal("Failed to fetch news: boom".to_string()).to_rpc_error();
        assert_eq!(code_of(err), INTERNAL_ERROR);
    }
}
