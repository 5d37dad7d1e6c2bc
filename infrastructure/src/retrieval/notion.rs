//! Notion supplementary context source
//!
//! Optional source of curated legal facts kept in a Notion workspace. Pages
//! matching the query are fetched via the search API and their block text is
//! concatenated into one chunk per page. Disabled unless configured; every
//! failure is soft.

use async_trait::async_trait;
use council_application::ports::context_source::ContextSource;
use council_domain::ContextChunk;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::warn;

const NOTION_SEARCH_URL: &str = "https://api.notion.com/v1/search";
const NOTION_BLOCKS_URL: &str = "https://api.notion.com/v1/blocks";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion search context source
pub struct NotionSource {
    client: reqwest::Client,
    api_key: String,
}

impl NotionSource {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    async fn search_pages(&self, query: &str, max_results: usize) -> Result<Value, reqwest::Error> {
        self.client
            .post(NOTION_SEARCH_URL)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&json!({
                "query": query,
                "page_size": max_results,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Fetch and concatenate the plain text of a page's blocks
    async fn page_content(&self, page_id: &str) -> String {
        let response = self
            .client
            .get(format!("{NOTION_BLOCKS_URL}/{page_id}/children"))
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);

        let body: Value = match response {
            Ok(response) => match response.json().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(page = page_id, error = %e, "Failed to read Notion page body");
                    return String::new();
                }
            },
            Err(e) => {
                warn!(page = page_id, error = %e, "Failed to fetch Notion page");
                return String::new();
            }
        };

        let mut parts = Vec::new();
        for block in body["results"].as_array().unwrap_or(&Vec::new()) {
            let Some(block_type) = block["type"].as_str() else {
                continue;
            };
            let rich_texts = block[block_type]["rich_text"].as_array();
            for rich_text in rich_texts.unwrap_or(&Vec::new()) {
                if let Some(text) = rich_text["plain_text"].as_str() {
                    parts.push(text.to_string());
                }
            }
        }
        parts.join("\n")
    }
}

/// Extract the title from a Notion page object
fn page_title(page: &Value) -> String {
    let Some(properties) = page["properties"].as_object() else {
        return String::new();
    };
    for property in properties.values() {
        if property["type"].as_str() == Some("title") {
            let parts = property["title"].as_array();
            return parts
                .unwrap_or(&Vec::new())
                .iter()
                .filter_map(|part| part["plain_text"].as_str())
                .collect();
        }
    }
    String::new()
}

#[async_trait]
impl ContextSource for NotionSource {
    fn origin(&self) -> &'static str {
        "notion"
    }

    async fn search(&self, query: &str, max_results: usize) -> Vec<ContextChunk> {
        let body = match self.search_pages(query, max_results).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Notion search failed, continuing without it");
                return Vec::new();
            }
        };

        let mut chunks = Vec::new();
        for page in body["results"].as_array().unwrap_or(&Vec::new()) {
            let Some(page_id) = page["id"].as_str() else {
                continue;
            };

            let content = self.page_content(page_id).await;
            if content.is_empty() {
                continue;
            }

            let title = page_title(page);
            let source = if title.is_empty() {
                "Notion".to_string()
            } else {
                format!("Notion: {title}")
            };

            chunks.push(ContextChunk::new(content, source, 0.0, self.origin()));
            if chunks.len() >= max_results {
                break;
            }
        }
        chunks
    }
}
