use std::sync::Arc;

use scholar_rpc::ToolRegistry;

/// Shared application state with the injected tool registry.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
}
