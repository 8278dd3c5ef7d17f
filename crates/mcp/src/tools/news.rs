// News headlines tool backed by an RSS feed

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_integer, json_schema_object, Tool};
use anyhow::{Context, Result};
use daybrief_core::config::{HttpConfig, NewsConfig};
use serde::Deserialize;
use std::time::Duration;

const NO_HEADLINES: &str = "No headlines are available right now.";
const MISSING_TITLE: &str = "(no title)";
const MISSING_LINK: &str = "#";

/// Fetches the configured RSS feed and formats the first entries as numbered
/// markdown links.
pub struct NewsHeadlinesTool {
    client: reqwest::Client,
    config: NewsConfig,
}

impl NewsHeadlinesTool {
    pub fn new(http: HttpConfig, config: NewsConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(http.user_agent)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    async fn headlines(&self, max_items: usize) -> Result<String, String> {
        let response = self
            .client
            .get(&self.config.feed_url)
            .send()
            .await
            .map_err(|e| format!("feed request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("feed returned HTTP {}", status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("failed to read feed body: {e}"))?;

        let channel =
            rss::Channel::read_from(&bytes[..]).map_err(|e| format!("invalid RSS feed: {e}"))?;

        let lines: Vec<String> = channel
            .items()
            .iter()
            .take(max_items)
            .enumerate()
            .map(|(i, item)| {
                let title = item.title().unwrap_or(MISSING_TITLE);
                let link = item.link().unwrap_or(MISSING_LINK);
                format!("{}. [{}]({})", i + 1, title, link)
            })
            .collect();

        if lines.is_empty() {
            return Ok(NO_HEADLINES.to_string());
        }

        tracing::info!(count = lines.len(), "headlines fetched");
        Ok(lines.join("\n"))
    }
}

#[derive(Debug, Deserialize)]
struct NewsArgs {
    #[serde(default)]
    max_items: Option<usize>,
}

#[async_trait::async_trait]
impl Tool for NewsHeadlinesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_news_headlines".to_string(),
            description: "Get the latest news headlines as numbered markdown links."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "max_items": json_schema_integer(
                        "Maximum number of headlines to return",
                        self.config.default_max_items as i64
                    )
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: NewsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_news_headlines")?;

        let max_items = args.max_items.unwrap_or(self.config.default_max_items);

        match self.headlines(max_items).await {
            Ok(text) => Ok(CallToolResult::text(text)),
            Err(msg) => Ok(CallToolResult::error(format!("News lookup failed: {msg}"))),
        }
    }
}
