pub mod dispatch;
pub mod jsonrpc;
pub mod registry;

pub use dispatch::dispatch;
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use registry::ToolRegistry;
