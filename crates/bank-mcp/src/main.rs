//! Context Bank MCP Server
//!
//! A Model Context Protocol server that exposes a filesystem-backed
//! context bank to agentic IDEs and other MCP clients.
//!
//! # Usage
//!
//! ```bash
//! context-bank --root <path> [--port <port>] [--endpoint <path>]
//! ```
//!
//! # Environment Variables
//!
//! - `CONTEXT_BANK_ROOT` (or legacy `MEMORY_BANK_ROOT`): storage root
//! - `SERVER_PORT`: listen port (default: `8080`)
//! - `SSE_ENDPOINT`: HTTP path serving both the SSE stream and POST
//!   exchanges (default: `/mcp`)
//! - `RUST_LOG`: control log verbosity (default: `bank_mcp=info`)
//!
//! # Protocol
//!
//! JSON-RPC 2.0 over HTTP on a single endpoint: GET opens an SSE push
//! channel, POST carries one request/response envelope pair per exchange.

use std::path::PathBuf;

use clap::Parser;

use bank_mcp::routes::build_router;
use bank_mcp::{Config, McpServer, ServerInfo};

/// MCP server for Context Bank
#[derive(Parser)]
#[command(name = "context-bank")]
#[command(about = "MCP server for Context Bank")]
#[command(version)]
struct Args {
    /// Storage root path (overrides CONTEXT_BANK_ROOT)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Listen port (overrides SERVER_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Endpoint path (overrides SSE_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bank_mcp=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env(bank_mcp::config::ConfigOverrides {
        root: args.root,
        port: args.port,
        endpoint: args.endpoint,
    })?;

    tracing::info!(
        root = ?config.root_path,
        port = config.server_port,
        endpoint = %config.sse_endpoint,
        "Starting context-bank server"
    );

    let server = McpServer::new(
        build_router(&config.root_path),
        ServerInfo {
            name: "context-bank".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    );
    let mut transport = server.serve(config.transport()).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    transport.stop().await;

    Ok(())
}
