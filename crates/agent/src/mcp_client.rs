//! MCP client over child-process stdio.
//!
//! Spawns the tool server as a child process and speaks line-delimited
//! JSON-RPC over its stdin/stdout. Requests are serialized behind one lock;
//! the tool contract is synchronous call-and-response, so in-order framing
//! is all that is needed.

use anyhow::{bail, Context, Result};
use daybrief_mcp::protocol::{
    CallToolParams, CallToolResult, JsonRpcRequest, JsonRpcResponse, ListToolsResult, ToolSchema,
    PROTOCOL_VERSION,
};
use futures::StreamExt;
use std::process::Stdio;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tokio_util::codec::{FramedRead, LinesCodec};

struct ClientIo {
    writer: ChildStdin,
    reader: FramedRead<ChildStdout, LinesCodec>,
}

pub struct McpClient {
    // Held so the server is reaped when the client drops.
    _child: Child,
    io: Mutex<ClientIo>,
    next_id: AtomicI64,
}

impl McpClient {
    /// Spawn the tool-server command and perform the initialize handshake.
    pub async fn spawn(command: &str, args: &[String]) -> Result<Self> {
        tracing::info!(command, "spawning MCP tool server");

        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn MCP server: {command}"))?;

        let writer = child
            .stdin
            .take()
            .context("MCP server child has no stdin")?;
        let reader = FramedRead::new(
            child
                .stdout
                .take()
                .context("MCP server child has no stdout")?,
            LinesCodec::new(),
        );

        let client = Self {
            _child: child,
            io: Mutex::new(ClientIo { writer, reader }),
            next_id: AtomicI64::new(1),
        };

        client.initialize().await?;
        Ok(client)
    }

    async fn initialize(&self) -> Result<()> {
        let result = self
            .request(
                "initialize",
                serde_json::json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": "daybrief-agent",
                        "version": env!("CARGO_PKG_VERSION"),
                    }
                }),
            )
            .await?;

        let server = result["serverInfo"]["name"].as_str().unwrap_or("unknown");
        tracing::info!(server, "MCP handshake complete");

        self.notify("notifications/initialized").await
    }

    /// Discover the advertised tool descriptors.
    pub async fn list_tools(&self) -> Result<Vec<ToolSchema>> {
        let result = self.request("tools/list", serde_json::json!({})).await?;
        let parsed: ListToolsResult =
            serde_json::from_value(result).context("invalid tools/list result")?;
        Ok(parsed.tools)
    }

    /// Invoke a tool and flatten the result to the single string the
    /// reasoning loop consumes. Error-text results come back as strings too.
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<String> {
        let params = CallToolParams {
            name: name.to_string(),
            arguments,
        };
        let result = self.request("tools/call", params).await?;
        let parsed: CallToolResult =
            serde_json::from_value(result).context("invalid tools/call result")?;
        Ok(parsed.joined_text())
    }

    async fn request(
        &self,
        method: &str,
        params: impl serde::Serialize,
    ) -> Result<serde_json::Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest::new(id, method, params);
        let mut line = serde_json::to_string(&request)?;
        line.push('\n');

        let mut io = self.io.lock().await;
        io.writer.write_all(line.as_bytes()).await?;
        io.writer.flush().await?;

        let Some(reply) = io.reader.next().await else {
            bail!("MCP server closed its stdout");
        };
        let response: JsonRpcResponse =
            serde_json::from_str(&reply?).context("invalid JSON-RPC response")?;

        if let Some(error) = response.error {
            bail!("MCP error {} for {method}: {}", error.code, error.message);
        }
        response
            .result
            .with_context(|| format!("empty result for {method}"))
    }

    async fn notify(&self, method: &str) -> Result<()> {
        let request = JsonRpcRequest::notification(method);
        let mut line = serde_json::to_string(&request)?;
        line.push('\n');

        let mut io = self.io.lock().await;
        io.writer.write_all(line.as_bytes()).await?;
        io.writer.flush().await?;
        Ok(())
    }
}
