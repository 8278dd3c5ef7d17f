// Daily quote tool backed by the chat model

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, Tool};
use anyhow::Result;
use daybrief_core::llm::{ChatClient, ChatMessage};
use std::sync::Arc;

const QUOTE_PROMPT: &str = "\
You write one short inspirational message per request. Respond in exactly two \
sections:

Quote: a real, attributed quotation (one or two sentences).
Encouragement: one warm sentence of encouragement for the reader's day.

No preamble, no extra sections.";

/// Generates a quote plus encouragement with a single model call. The raw
/// model text is returned as-is; there is no retry and no format validation.
pub struct DailyQuoteTool {
    llm: Arc<ChatClient>,
}

impl DailyQuoteTool {
    pub fn new(llm: Arc<ChatClient>) -> Self {
        Self { llm }
    }
}

#[async_trait::async_trait]
impl Tool for DailyQuoteTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "daily_quote".to_string(),
            description: "Generate an inspirational quote and a short encouragement \
                          for the day."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let messages = vec![
            ChatMessage::system(QUOTE_PROMPT),
            ChatMessage::user("Give me today's quote."),
        ];

        match self.llm.complete(messages).await {
            Ok(text) => Ok(CallToolResult::text(text)),
            Err(e) => Ok(CallToolResult::error(format!(
                "Quote generation failed: {e}"
            ))),
        }
    }
}
