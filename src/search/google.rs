//! Google Programmable Search adapter.
//!
//! One GET per query against the Custom Search JSON API, authenticated
//! with an API key and an engine key. Only `items[].{title,snippet,link}`
//! are consumed; everything else in the response is ignored.

use crate::models::SearchResult;
use crate::search::SearchBackend;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Client for the Custom Search JSON API.
pub struct GoogleSearchClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    engine_key: String,
}

impl GoogleSearchClient {
    /// Creates a client with a per-request timeout.
    pub fn new(
        base_url: String,
        api_key: String,
        engine_key: String,
        timeout_seconds: u64,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            api_key,
            engine_key,
        }
    }
}

#[async_trait]
impl SearchBackend for GoogleSearchClient {
    async fn search(&self, query: &str) -> Result<SearchResult> {
        let url = format!("{}/customsearch/v1", self.base_url.trim_end_matches('/'));
        debug!("Searching: {}", query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("key", self.api_key.as_str()),
                ("cx", self.engine_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow!("Search request timed out")
                } else {
                    anyhow!("Failed to send search request: {}", e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Search API error {}: {}", status, body));
        }

        response
            .json::<SearchResult>()
            .await
            .context("Failed to parse search response")
    }
}
