//! MCP server for Context Bank
//!
//! Exposes the context-bank tools to MCP clients over a hybrid HTTP
//! transport: a long-lived SSE push channel for liveness events and plain
//! POST exchanges for JSON-RPC invocations.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client ]
//!    |  GET  /mcp  -> SSE channel (connected + ping events)
//!    |  POST /mcp  -> one JSON-RPC envelope per exchange
//!    v
//! [ SseServerTransport ]  -- body parse, CORS, 404, connection registry
//!    v
//! [ McpServer / McpRouter ]  -- initialize, tools/list, tools/call
//!    v
//! [ ControllerToolAdapter -> bank-core controllers ]
//! ```
//!
//! Every inbound request with an id yields exactly one response envelope
//! carrying that id; all failures (unknown method, unknown tool, handler
//! error, malformed body, transport not ready) come back as protocol-level
//! error envelopes under HTTP 200, never as transport faults.

pub mod adapter;
pub mod config;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod router;
pub mod routes;
pub mod server;
pub mod tools;
pub mod transport;

pub use adapter::adapt_controller;
pub use config::Config;
pub use error::{Error, ErrorCode, McpError, Result};
pub use protocol::{JsonRpcRequest, JsonRpcResponse, ServerInfo};
pub use router::{McpRouter, ToolHandler};
pub use server::McpServer;
pub use tools::{ToolContent, ToolDescriptor, ToolResult};
pub use transport::{RequestProcessor, SseServerTransport, TransportConfig};
