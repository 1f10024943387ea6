pub mod error;
pub mod traits;
pub mod types;

pub use error::Error;
pub use traits::Tool;
pub use types::Article;
