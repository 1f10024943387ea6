use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use serde_json::{Map, Value};

use scholar_core::{Article, Error, Tool};

use crate::config::ToolEntry;

/// Default Crossref works endpoint.
pub const CROSSREF_API: &str = "https://api.crossref.org/works";

/// Fixed identifying header sent with every Crossref request.
const USER_AGENT: &str = "scholar-gateway/0.1";

/// Total attempts per search, including the first.
const MAX_ATTEMPTS: u32 = 3;

/// Validated parameters for `scholar.search_articles`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchParams {
    pub query: String,
    pub max_results: Option<u32>,
    pub since_year: Option<i32>,
    pub until_year: Option<i32>,
}

/// Bibliographic search tool backed by the Crossref metadata API.
///
/// Owns one long-lived HTTP client, shared by concurrent searches, for the
/// lifetime of the tool.
pub struct ScholarTool {
    client: reqwest::Client,
    api_url: String,
    max_results: u32,
    polite_delay: Duration,
    backoff_unit: Duration,
}

impl ScholarTool {
    pub const METHOD: &'static str = "scholar.search_articles";

    /// Construct the tool from its config entry, allocating the HTTP client
    /// with the configured per-attempt timeout.
    ///
    /// # Errors
    /// Returns `Error::Config` for an invalid timeout and `Error::Internal`
    /// if the HTTP client cannot be built.
    pub fn new(entry: &ToolEntry) -> Result<Self, Error> {
        let timeout_s = entry.timeout_s();
        if !timeout_s.is_finite() || timeout_s <= 0.0 {
            return Err(Error::Config(format!("invalid timeout_s: {timeout_s}")));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs_f64(timeout_s))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            api_url: entry
                .api_url
                .clone()
                .unwrap_or_else(|| CROSSREF_API.to_string()),
            max_results: entry.max_results(),
            polite_delay: Duration::from_millis(entry.polite_delay_ms()),
            backoff_unit: Duration::from_secs(1),
        })
    }

    /// Query Crossref and normalize the result items.
    ///
    /// The politeness delay elapses after the attempt cycle whether it
    /// succeeded or not; Crossref rate limits are shared, so the throttle
    /// applies even to empty or failed calls.
    ///
    /// # Errors
    /// Returns `Error::Upstream` once all attempts are exhausted.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Article>, Error> {
        let outcome = self.run_attempts(params).await;
        tokio::time::sleep(self.polite_delay).await;
        outcome
    }

    async fn run_attempts(&self, params: &SearchParams) -> Result<Vec<Article>, Error> {
        let rows = params.max_results.unwrap_or(self.max_results);

        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("rows", rows.to_string()),
        ];
        if let Some(filter) = date_filter(params.since_year, params.until_year) {
            query.push(("filter", filter));
        }

        let mut attempt: u32 = 0;
        loop {
            match self.request(&query).await {
                Ok(payload) => return Ok(parse_items(&payload)),
                Err(err) => {
                    attempt += 1;
                    tracing::warn!(
                        "crossref request failed (attempt {attempt}/{MAX_ATTEMPTS}): {err}"
                    );
                    tokio::time::sleep(self.backoff_unit * 2u32.pow(attempt - 1)).await;
                    if attempt >= MAX_ATTEMPTS {
                        return Err(Error::Upstream(err.to_string()));
                    }
                }
            }
        }
    }

    async fn request(&self, query: &[(&str, String)]) -> Result<Value, reqwest::Error> {
        let response = self
            .client
            .get(&self.api_url)
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        response.json().await
    }
}

#[async_trait]
impl Tool for ScholarTool {
    fn method(&self) -> &'static str {
        Self::METHOD
    }

    async fn call(&self, params: Map<String, Value>) -> Result<Value, Error> {
        let params: SearchParams = serde_json::from_value(Value::Object(params))
            .map_err(|e| Error::InvalidParams(e.to_string()))?;

        let articles = self.search(&params).await?;
        serde_json::to_value(articles).map_err(|e| Error::Internal(e.to_string()))
    }

    async fn shutdown(&self) {
        // The reqwest client releases its connection pool on drop; nothing
        // else is held.
        tracing::debug!("scholar tool shut down");
    }
}

/// Inclusive publication-date filter for the given year bounds, or `None`
/// when both are absent.
fn date_filter(since_year: Option<i32>, until_year: Option<i32>) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(year) = since_year {
        parts.push(format!("from-pub-date:{year}-01-01"));
    }
    if let Some(year) = until_year {
        parts.push(format!("until-pub-date:{year}-12-31"));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(","))
    }
}

/// Normalize every item under `message.items`. A missing or empty list
/// yields an empty vec, never an error.
fn parse_items(payload: &Value) -> Vec<Article> {
    payload
        .pointer("/message/items")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(parse_item).collect())
        .unwrap_or_default()
}

fn parse_item(item: &Value) -> Article {
    let first_in_list = |key: &str| {
        item.get(key)
            .and_then(Value::as_array)
            .and_then(|list| list.first())
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let authors = item
        .get("author")
        .and_then(Value::as_array)
        .map(|authors| {
            authors
                .iter()
                .map(|author| {
                    let family = author.get("family").and_then(Value::as_str).unwrap_or_default();
                    let given = author.get("given").and_then(Value::as_str).unwrap_or_default();
                    format!("{family}, {given}")
                })
                .collect()
        })
        .unwrap_or_default();

    let year = item
        .pointer("/issued/date-parts/0/0")
        .and_then(Value::as_i64)
        .and_then(|y| i32::try_from(y).ok());

    Article {
        title: first_in_list("title"),
        journal: first_in_list("container-title"),
        authors,
        year,
        doi: item
            .get("DOI")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        url: item
            .get("URL")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}
