// Mock schedule tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, Tool};
use anyhow::Result;

/// Fixed demo schedule, one time-labeled event per line. No external calls,
/// no failure mode; repeated calls return byte-identical output.
const SCHEDULE: &str = "\
09:00 Standup meeting
10:30 Design review
12:00 Lunch with the platform team
14:00 Focused work block
16:30 1:1 with manager
19:00 Gym";

pub struct TodayScheduleTool;

impl TodayScheduleTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TodayScheduleTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for TodayScheduleTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "today_schedule".to_string(),
            description: "Get today's schedule as a list of time-labeled events."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        Ok(CallToolResult::text(SCHEDULE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn repeated_calls_are_byte_identical() {
        let tool = TodayScheduleTool::new();
        let first = tool.execute(serde_json::json!({})).await.unwrap();
        let second = tool.execute(serde_json::json!({})).await.unwrap();
        assert_eq!(first.joined_text(), second.joined_text());
    }

    #[tokio::test]
    async fn every_line_starts_with_a_time_label() {
        let tool = TodayScheduleTool::new();
        let text = tool.execute(serde_json::json!({})).await.unwrap().joined_text();
        assert!(!text.is_empty());
        for line in text.lines() {
            let (time, _) = line.split_once(' ').expect("time-labeled line");
            assert!(time.contains(':'), "bad time label in line: {line}");
        }
    }
}
