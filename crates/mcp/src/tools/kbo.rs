// KBO league standings tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, Tool};
use anyhow::Result;
use daybrief_core::config::{HttpConfig, KboConfig};
use serde::Deserialize;
use std::time::Duration;

const NO_DATA: &str = "No ranking data available.";
const HEADER: &str = "KBO League Standings";

/// Fetches the KBO team rankings endpoint and formats one line per team.
pub struct KboRankTool {
    client: reqwest::Client,
    config: KboConfig,
}

#[derive(Debug, Deserialize)]
struct RankPayload {
    #[serde(default)]
    list: Vec<RankEntry>,
}

#[derive(Debug, Deserialize)]
struct RankEntry {
    rank: u32,
    name: String,
    win: u32,
    loss: u32,
    wpct: f64,
    #[serde(default)]
    streak: Option<String>,
}

impl KboRankTool {
    pub fn new(http: HttpConfig, config: KboConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(http.user_agent)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    async fn standings(&self) -> Result<String, String> {
        let response = self
            .client
            .get(&self.config.rank_url)
            .send()
            .await
            .map_err(|e| format!("ranking request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("ranking endpoint returned HTTP {}", status.as_u16()));
        }

        let payload: RankPayload = response
            .json()
            .await
            .map_err(|e| format!("invalid ranking payload: {e}"))?;

        if payload.list.is_empty() {
            return Ok(NO_DATA.to_string());
        }

        let mut lines = vec![HEADER.to_string()];
        for team in &payload.list {
            let streak = team.streak.as_deref().unwrap_or("-");
            lines.push(format!(
                "{}. {} — {}W {}L, PCT {:.3}, streak {}",
                team.rank, team.name, team.win, team.loss, team.wpct, streak
            ));
        }

        tracing::info!(teams = payload.list.len(), "standings fetched");
        Ok(lines.join("\n"))
    }
}

#[async_trait::async_trait]
impl Tool for KboRankTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_kbo_rank".to_string(),
            description: "Get current KBO professional baseball standings: rank, team, \
                          wins, losses, win percentage and streak."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        match self.standings().await {
            Ok(text) => Ok(CallToolResult::text(text)),
            Err(msg) => Ok(CallToolResult::error(format!(
                "Ranking lookup failed: {msg}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_for(server: &MockServer) -> KboRankTool {
        KboRankTool::new(
            HttpConfig::default(),
            KboConfig {
                rank_url: format!("{}/rank.json", server.uri()),
            },
        )
    }

    #[tokio::test]
    async fn formats_one_line_per_team_with_three_decimal_pct() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rank.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "list": [
                    {"rank": 1, "name": "KIA", "win": 87, "loss": 55, "wpct": 0.6126, "streak": "W3"},
                    {"rank": 2, "name": "Samsung", "win": 78, "loss": 64, "wpct": 0.5493, "streak": "L1"}
                ]
            })))
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(serde_json::json!({}))
            .await
            .unwrap();

        let text = result.joined_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "1. KIA — 87W 55L, PCT 0.613, streak W3");
        assert_eq!(lines[2], "2. Samsung — 78W 64L, PCT 0.549, streak L1");
    }

    #[tokio::test]
    async fn empty_team_list_returns_fixed_no_data_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rank.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"list": []})),
            )
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(serde_json::json!({}))
            .await
            .unwrap();

        assert_eq!(result.joined_text(), NO_DATA);
        assert!(result.is_error.is_none());
    }

    #[tokio::test]
    async fn upstream_failure_becomes_error_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rank.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(serde_json::json!({}))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(result.joined_text().starts_with("Ranking lookup failed"));
    }
}
