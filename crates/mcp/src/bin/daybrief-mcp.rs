// Standalone MCP tool server speaking JSON-RPC over stdio

use anyhow::Result;
use daybrief_core::config::AppConfig;
use daybrief_mcp::tools::build_registry;
use daybrief_mcp::McpServer;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    // stdout carries the protocol, so all logging goes to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config_path = std::env::var("DAYBRIEF_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("daybrief.toml"));
    let config = AppConfig::load(&config_path)?;

    let registry = build_registry(&config);
    tracing::info!("registered {} tools", registry.len());

    let server = McpServer::new(registry);
    server.run_stdio().await?;

    Ok(())
}
