// Daily briefing orchestrator tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, Tool};
use anyhow::Result;

/// Names of the tools the briefing composes, in invocation order.
pub const BRIEFING_SEQUENCE: [&str; 6] = [
    "get_weather",
    "get_news_headlines",
    "scrape_page_text",
    "get_kbo_rank",
    "today_schedule",
    "daily_quote",
];

/// Instructions handed back to the reasoning loop. Orchestration is delegated
/// to the calling model: this tool performs no I/O of its own and holds no
/// HTTP client.
const BRIEFING_INSTRUCTIONS: &str = "\
Assemble the user's daily briefing by calling the following tools in order and \
composing their outputs:

1. get_weather — current weather for the user's city (ask for the city if you \
do not know it).
2. get_news_headlines — today's top headlines.
3. scrape_page_text — if the user shared a link, or a headline deserves a \
summary, fetch that page's text.
4. get_kbo_rank — current KBO standings.
5. today_schedule — today's schedule.
6. daily_quote — a quote and encouragement to close with.

Then present one report with these sections, in this order:

## Good morning!
### Weather
### News
### Baseball
### Schedule
### Quote of the day

Keep each section short. Render links as [title](url) markdown.";

pub struct BriefTodayTool;

impl BriefTodayTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BriefTodayTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for BriefTodayTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "brief_today".to_string(),
            description: "Get the instructions for assembling the user's daily briefing \
                          from the other tools."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        Ok(CallToolResult::text(BRIEFING_INSTRUCTIONS))
    }
}
