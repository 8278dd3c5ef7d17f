// Web page scraping tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use daybrief_core::config::{HttpConfig, ScrapeConfig};
use serde::Deserialize;
use std::io::Cursor;
use std::time::Duration;
use url::Url;

/// Fetches a web page and returns its readable text content, with
/// script/style/nav boilerplate stripped and whitespace collapsed.
pub struct ScrapePageTool {
    client: reqwest::Client,
    max_chars: usize,
}

impl ScrapePageTool {
    pub fn new(http: HttpConfig, scrape: ScrapeConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(http.user_agent)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            max_chars: scrape.max_chars,
        }
    }

    async fn scrape(&self, url: &Url) -> String {
        let response = match self.client.get(url.as_str()).send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                return "Request timed out: the page took too long to respond.".to_string();
            }
            Err(e) => return format!("Scrape failed: {e}"),
        };

        let status = response.status();
        if !status.is_success() {
            return format!("HTTP error: {}", status.as_u16());
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => return format!("Failed to read page body: {e}"),
        };

        let extract_url = url.clone();
        let extracted = tokio::task::spawn_blocking(move || {
            readability::extractor::extract(&mut Cursor::new(body), &extract_url)
        })
        .await;

        let text = match extracted {
            Ok(Ok(product)) => product.text,
            Ok(Err(e)) => return format!("Scrape failed: could not extract content ({e})"),
            Err(e) => return format!("Scrape failed: {e}"),
        };

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return format!("No readable content found at {url}");
        }

        tracing::info!(url = %url, chars = collapsed.chars().count(), "scrape complete");
        truncate_chars(&collapsed, self.max_chars)
    }
}

/// Cut to at most `max` characters, never splitting a code point.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ScrapeArgs {
    url: String,
}

#[async_trait::async_trait]
impl Tool for ScrapePageTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "scrape_page_text".to_string(),
            description: "Fetch a web page and return its readable text content. \
                          Boilerplate (scripts, styles, navigation) is removed and the \
                          result is truncated to a fixed length."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "url": json_schema_string("The URL of the page to scrape")
                }),
                vec!["url"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ScrapeArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for scrape_page_text")?;

        let url = match Url::parse(&args.url) {
            Ok(url) => url,
            Err(e) => return Ok(CallToolResult::error(format!("Invalid URL: {e}"))),
        };

        if url.scheme() != "http" && url.scheme() != "https" {
            return Ok(CallToolResult::error(format!(
                "Only HTTP/HTTPS URLs are supported, got: {}",
                url.scheme()
            )));
        }

        tracing::info!(url = %url, "scraping page");
        let text = self.scrape(&url).await;
        // Upstream failures come back as readable text for the reasoning loop.
        Ok(CallToolResult::text(text))
    }
}
