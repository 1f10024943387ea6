use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Error;

/// A callable tool exposed over the RPC gateway.
///
/// Implementations are shared behind `Arc` and invoked concurrently; any
/// state they hold (such as an HTTP client) must be safe for concurrent use.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique RPC method name this tool answers to, e.g.
    /// `scholar.search_articles`.
    fn method(&self) -> &'static str;

    /// Invoke the tool with the request's named parameters.
    async fn call(&self, params: Map<String, Value>) -> Result<Value, Error>;

    /// Release resources held by the tool. Called once at process shutdown;
    /// behavior of `call` after this point is undefined.
    async fn shutdown(&self);
}
