use anyhow::{Context, Result};
use clap::Parser;
use daybrief_core::config::AppConfig;
use daybrief_core::llm::{ChatClient, ToolDefinition};
use std::path::PathBuf;
use std::sync::Arc;

mod agent;
mod api;
mod mcp_client;

use agent::Agent;
use mcp_client::McpClient;

#[derive(Parser, Debug)]
#[command(name = "daybrief-agent")]
#[command(about = "Conversational agent host for the daybrief tool server", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "daybrief.toml")]
    config: PathBuf,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Command used to launch the MCP tool server
    #[arg(long, env = "DAYBRIEF_MCP_COMMAND", default_value = "daybrief-mcp")]
    mcp_command: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daybrief=info,tower_http=debug".into()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = AppConfig::load(&args.config)?;

    tracing::info!(model = %config.llm.model, "starting daybrief agent host");

    // Discover the tool set from the registry process.
    let client = Arc::new(
        McpClient::spawn(&args.mcp_command, &[])
            .await
            .context("could not start the MCP tool server")?,
    );
    let schemas = client.list_tools().await?;
    tracing::info!("discovered {} tools", schemas.len());

    let tools: Vec<ToolDefinition> = schemas
        .into_iter()
        .map(|s| ToolDefinition {
            name: s.name,
            description: s.description,
            parameters: s.input_schema,
        })
        .collect();

    let agent = Arc::new(Agent::new(
        ChatClient::new(config.llm.clone()),
        client,
        tools,
        config.agent.max_steps,
    ));

    let addr = format!("{}:{}", args.host, args.port);
    api::serve(&addr, agent).await?;

    Ok(())
}
