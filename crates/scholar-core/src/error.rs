/// Core error type for the scholar gateway.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("duplicate method registration: {0}")]
    DuplicateMethod(String),

    #[error("internal error: {0}")]
    Internal(String),
}
