use axum::{extract::State, Json};

use scholar_rpc::{dispatch, JsonRpcRequest, JsonRpcResponse};

use crate::app_state::AppState;

/// Handle a JSON-RPC call.
///
/// Protocol and tool failures are carried inside the JSON-RPC envelope; the
/// transport status is always 200 for any body that decodes as a request
/// object.
pub async fn rpc(
    State(state): State<AppState>,
    Json(req): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    Json(dispatch(&state.registry, req).await)
}
