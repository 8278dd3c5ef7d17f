//! Reasoning loop binding the discovered tool set to the chat model.

use crate::mcp_client::McpClient;
use anyhow::Result;
use daybrief_core::llm::{ChatClient, ChatMessage, ToolDefinition};
use serde::Serialize;
use tokio::sync::mpsc;

const SYSTEM_PROMPT: &str = "\
You are a friendly, helpful assistant with access to a set of tools: scraping \
the text of a web page, looking up a city's current weather, fetching the \
latest news headlines, reporting KBO baseball standings, reading today's \
schedule, generating an inspirational quote, and assembling a full daily \
briefing. When the user asks for their briefing, call brief_today and follow \
its instructions; ask for the user's city first if you do not know it.

Ground rules: be concise and polite, pick the right tool for the question, \
relay headline lists as returned, and format links as [title](url) markdown. \
Tool outputs that read like error messages should be summarized for the user \
rather than retried endlessly.";

/// Events emitted incrementally while a turn is processed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    ToolCall { name: String },
    ToolResult { name: String, output: String },
    Answer { text: String },
    Error { message: String },
    Done,
}

impl AgentEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToolCall { .. } => "tool_call",
            Self::ToolResult { .. } => "tool_result",
            Self::Answer { .. } => "answer",
            Self::Error { .. } => "error",
            Self::Done => "done",
        }
    }
}

/// Seam between the reasoning loop and the tool transport.
#[async_trait::async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke(&self, name: &str, arguments: serde_json::Value) -> Result<String>;
}

#[async_trait::async_trait]
impl ToolInvoker for McpClient {
    async fn invoke(&self, name: &str, arguments: serde_json::Value) -> Result<String> {
        self.call_tool(name, arguments).await
    }
}

pub struct Agent {
    llm: ChatClient,
    invoker: std::sync::Arc<dyn ToolInvoker>,
    tools: Vec<ToolDefinition>,
    max_steps: usize,
}

impl Agent {
    pub fn new(
        llm: ChatClient,
        invoker: std::sync::Arc<dyn ToolInvoker>,
        tools: Vec<ToolDefinition>,
        max_steps: usize,
    ) -> Self {
        Self {
            llm,
            invoker,
            tools,
            max_steps,
        }
    }

    /// Process one user turn, streaming events into `tx`. A closed receiver
    /// means the caller went away: generation stops, but an in-flight tool
    /// call still runs to completion first.
    pub async fn run(&self, user_message: &str, tx: mpsc::Sender<AgentEvent>) {
        let mut messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_message),
        ];

        for step in 0..self.max_steps {
            let response = match self
                .llm
                .complete_with_tools(messages.clone(), &self.tools)
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!("model call failed: {e}");
                    let _ = tx
                        .send(AgentEvent::Error {
                            message: format!("model call failed: {e}"),
                        })
                        .await;
                    let _ = tx.send(AgentEvent::Done).await;
                    return;
                }
            };

            if response.is_final() {
                let text = response.content.unwrap_or_default();
                tracing::info!(step, "final answer produced");
                let _ = tx.send(AgentEvent::Answer { text }).await;
                let _ = tx.send(AgentEvent::Done).await;
                return;
            }

            messages.push(ChatMessage::assistant_tool_calls(
                response.content.clone(),
                &response.tool_calls,
            ));

            for call in &response.tool_calls {
                if tx
                    .send(AgentEvent::ToolCall {
                        name: call.name.clone(),
                    })
                    .await
                    .is_err()
                {
                    tracing::info!("client disconnected, stopping generation");
                    return;
                }

                tracing::info!(step, tool = %call.name, "executing tool call");
                let output = match self.invoker.invoke(&call.name, call.arguments.clone()).await
                {
                    Ok(text) => text,
                    // The loop only understands strings; transport failures
                    // become observable text like any other tool error.
                    Err(e) => format!("Tool call failed: {e}"),
                };

                messages.push(ChatMessage::tool_result(call.id.clone(), output.clone()));
                if tx
                    .send(AgentEvent::ToolResult {
                        name: call.name.clone(),
                        output,
                    })
                    .await
                    .is_err()
                {
                    return;
                }
            }
        }

        tracing::warn!(max_steps = self.max_steps, "step budget exhausted");
        let _ = tx
            .send(AgentEvent::Error {
                message: format!(
                    "I could not finish within {} reasoning steps. Try a narrower request.",
                    self.max_steps
                ),
            })
            .await;
        let _ = tx.send(AgentEvent::Done).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybrief_core::config::LlmConfig;
    use daybrief_core::retry::RetryPolicy;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StubInvoker;

    #[async_trait::async_trait]
    impl ToolInvoker for StubInvoker {
        async fn invoke(&self, name: &str, _arguments: serde_json::Value) -> Result<String> {
            Ok(format!("{name} output"))
        }
    }

    fn agent_for(server: &MockServer, max_steps: usize) -> Agent {
        let config = LlmConfig {
            base_url: server.uri(),
            model: "test-model".to_string(),
            api_key: Some("test-key".to_string()),
            temperature: 0.0,
            max_tokens: None,
            // Zero delays keep the retry path fast in tests.
            retry: RetryPolicy {
                max_attempts: 3,
                multiplier_secs: 0,
                min_delay_secs: 0,
                max_delay_secs: 0,
            },
        };
        let tools = vec![ToolDefinition {
            name: "today_schedule".to_string(),
            description: "schedule".to_string(),
            parameters: serde_json::json!({"type": "object", "properties": {}}),
        }];
        Agent::new(ChatClient::new(config), Arc::new(StubInvoker), tools, max_steps)
    }

    fn tool_call_response() -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "today_schedule", "arguments": "{}"}
                }]
            }}]
        })
    }

    fn answer_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": text}}]
        })
    }

    async fn collect_events(agent: &Agent, message: &str) -> Vec<AgentEvent> {
        let (tx, mut rx) = mpsc::channel(32);
        agent.run(message, tx).await;
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn tool_call_then_answer_yields_ordered_events() {
        let server = MockServer::start().await;
        // First model round: request a tool call. Second round: answer.
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_response()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(answer_response("here you go")),
            )
            .mount(&server)
            .await;

        let agent = agent_for(&server, 8);
        let events = collect_events(&agent, "what's on today?").await;

        let kinds: Vec<&str> = events.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["tool_call", "tool_result", "answer", "done"]);
        match &events[1] {
            AgentEvent::ToolResult { name, output } => {
                assert_eq!(name, "today_schedule");
                assert_eq!(output, "today_schedule output");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn direct_answer_skips_tool_events() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer_response("hello")))
            .mount(&server)
            .await;

        let agent = agent_for(&server, 8);
        let events = collect_events(&agent, "hi").await;
        let kinds: Vec<&str> = events.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["answer", "done"]);
    }

    #[tokio::test]
    async fn step_budget_exhaustion_emits_error() {
        let server = MockServer::start().await;
        // The model asks for a tool on every round.
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_response()))
            .mount(&server)
            .await;

        let agent = agent_for(&server, 2);
        let events = collect_events(&agent, "loop forever").await;
        let kinds: Vec<&str> = events.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "tool_call",
                "tool_result",
                "tool_call",
                "tool_result",
                "error",
                "done"
            ]
        );
    }

    #[tokio::test]
    async fn model_failure_is_reported_not_panicked() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let agent = agent_for(&server, 8);
        let events = collect_events(&agent, "hi").await;
        let kinds: Vec<&str> = events.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["error", "done"]);
    }

    #[tokio::test]
    async fn dropped_receiver_stops_generation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_response()))
            .mount(&server)
            .await;

        let agent = agent_for(&server, 8);
        let (tx, rx) = mpsc::channel(32);
        drop(rx);
        // Returns promptly instead of looping until the step budget.
        agent.run("hi", tx).await;
    }
}
