use serde_json::{Map, Value};

use scholar_core::Error;

use crate::jsonrpc::{
    JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    METHOD_NOT_FOUND,
};
use crate::registry::ToolRegistry;

/// Dispatch one JSON-RPC request to its registered tool.
///
/// Every outcome is a well-formed JSON-RPC envelope; protocol and tool
/// failures are carried in the body, never as transport errors. The
/// response `id` echoes the request's `id` (null when the request had
/// none).
pub async fn dispatch(registry: &ToolRegistry, req: JsonRpcRequest) -> JsonRpcResponse {
    if req.method.is_empty() {
        return JsonRpcResponse::error(req.id, INVALID_REQUEST, "Invalid Request");
    }

    let Some(tool) = registry.get(&req.method) else {
        return JsonRpcResponse::error(req.id, METHOD_NOT_FOUND, "Method not found");
    };

    // JSON-RPC params must be structured; a bare scalar or array is a
    // params error, not an invocation error.
    let params = match req.params {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return JsonRpcResponse::error(req.id, INVALID_PARAMS, "Invalid params");
        }
    };

    match tool.call(params).await {
        Ok(result) => JsonRpcResponse::success(req.id, result),
        Err(err @ Error::InvalidParams(_)) => {
            JsonRpcResponse::error(req.id, INVALID_PARAMS, err.to_string())
        }
        Err(err) => JsonRpcResponse::error(req.id, INTERNAL_ERROR, err.to_string()),
    }
}
