// MCP (Model Context Protocol) tool server.
// Exposes the daybrief tool set to agent clients over JSON-RPC on stdio.

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
