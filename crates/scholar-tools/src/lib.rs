pub mod config;
pub mod crossref;

pub use config::{build_registry, ToolEntry, ToolsConfig};
pub use crossref::{ScholarTool, SearchParams};
