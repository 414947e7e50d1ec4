//! MCP server implementation for the token screener.
//!
//! This module provides the MCP protocol server that exposes token listing,
//! screening and cache administration to AI assistants.

pub mod handlers;

pub use handlers::TokenScreenerServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the token screener MCP server with stdio transport.
///
/// Communicates via stdin/stdout and returns once the client disconnects.
pub async fn run_server(server: TokenScreenerServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
