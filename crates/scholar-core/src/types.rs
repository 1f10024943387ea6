use serde::{Deserialize, Serialize};

/// A normalized bibliographic record produced from one external-API result
/// item. Missing string fields render as empty strings so the wire shape is
/// stable regardless of how sparse the upstream metadata is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// Author names as `"Family, Given"`, in the order the upstream API
    /// listed them.
    pub authors: Vec<String>,
    pub journal: String,
    pub year: Option<i32>,
    pub doi: String,
    pub url: String,
}
