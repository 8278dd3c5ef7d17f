//! Error types shared across the workspace.

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("failed to parse configuration file {0}: {1}")]
    Parse(String, #[source] toml::de::Error),
}

/// Errors from the chat-completions client.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM API key is not configured (set {0})")]
    MissingApiKey(&'static str),

    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("LLM returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid LLM response: {0}")]
    InvalidResponse(String),
}
