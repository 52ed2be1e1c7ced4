//! Method dispatcher and tool registry
//!
//! Holds the insertion-ordered mapping from tool name to (descriptor,
//! handler) and answers the three MCP method kinds. Dispatch is purely
//! functional over the registry's contents; all state lives in the
//! registered handlers.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    ToolCallParams, ToolsCapability, PROTOCOL_VERSION,
};
use crate::tools::ToolDescriptor;
use crate::{ErrorCode, McpError};

/// An invocable tool implementation.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Invoke the tool with the raw `arguments` object.
    async fn call(&self, arguments: Value) -> std::result::Result<Value, McpError>;
}

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Insertion-ordered tool registry plus the method-name switch.
#[derive(Default)]
pub struct McpRouter {
    tools: Vec<RegisteredTool>,
}

impl McpRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Registering the same name twice is a programming
    /// error and panics.
    pub fn register_tool(&mut self, descriptor: ToolDescriptor, handler: Arc<dyn ToolHandler>) {
        assert!(
            self.tool_handler(&descriptor.name).is_none(),
            "duplicate tool name: {}",
            descriptor.name
        );
        self.tools.push(RegisteredTool { descriptor, handler });
    }

    /// Static capability shape advertising tool support.
    pub fn capabilities(&self) -> ServerCapabilities {
        ServerCapabilities {
            tools: ToolsCapability {},
        }
    }

    /// All tool descriptors, in registration order.
    pub fn tool_schemas(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    /// Look up a handler by tool name.
    pub fn tool_handler(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools
            .iter()
            .find(|t| t.descriptor.name == name)
            .map(|t| t.handler.clone())
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Dispatch one invocation envelope to the matching method handler and
    /// build the response envelope. Never returns more or less than one
    /// envelope per request.
    pub async fn dispatch(
        &self,
        request: JsonRpcRequest,
        server_info: &ServerInfo,
    ) -> JsonRpcResponse {
        let id = request.id.clone();
        tracing::debug!(method = %request.method, id = ?id, "dispatching request");

        match request.method.as_str() {
            "initialize" => {
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION.to_string(),
                    capabilities: self.capabilities(),
                    server_info: server_info.clone(),
                };
                match serde_json::to_value(result) {
                    Ok(value) => JsonRpcResponse::success(id, value),
                    Err(e) => JsonRpcResponse::error(id, ErrorCode::InternalError, e.to_string()),
                }
            }
            "tools/list" => {
                JsonRpcResponse::success(id, json!({ "tools": self.tool_schemas() }))
            }
            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(request.params) {
                    Ok(p) => p,
                    Err(e) => {
                        return JsonRpcResponse::error(
                            id,
                            ErrorCode::InternalError,
                            format!("Invalid tool call parameters: {e}"),
                        );
                    }
                };
                match self.tool_handler(&params.name) {
                    Some(handler) => match handler.call(params.arguments).await {
                        Ok(result) => JsonRpcResponse::success(id, result),
                        Err(e) => {
                            tracing::warn!(tool = %params.name, error = %e, "tool call failed");
                            JsonRpcResponse::from_mcp_error(id, e)
                        }
                    },
                    None => JsonRpcResponse::error(
                        id,
                        ErrorCode::MethodNotFound,
                        format!("Tool {} not found", params.name),
                    ),
                }
            }
            other => JsonRpcResponse::error(
                id,
                ErrorCode::MethodNotFound,
                format!("Method {other} not found"),
            ),
        }
    }
}
