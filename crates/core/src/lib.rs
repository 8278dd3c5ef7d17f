// Shared foundation for the daybrief tool server and agent host:
// configuration, error taxonomy, bounded retry, and the LLM client.

pub mod config;
pub mod error;
pub mod llm;
pub mod retry;

pub use config::AppConfig;
pub use error::{ConfigError, LlmError};
pub use llm::ChatClient;
pub use retry::RetryPolicy;
