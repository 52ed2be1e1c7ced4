//! Controller-to-tool-handler adapter
//!
//! Lets a `bank-core` controller serve as a dispatcher handler. The
//! controller's status class decides the outcome: 2xx becomes a text
//! result, 4xx a validation error, anything else an internal error. No
//! controller failure escapes this boundary unmapped.

use std::sync::Arc;

use async_trait::async_trait;
use bank_core::{Controller, Request};
use serde_json::Value;

use crate::router::ToolHandler;
use crate::tools::ToolResult;
use crate::McpError;

pub struct ControllerToolAdapter {
    controller: Arc<dyn Controller>,
}

impl ControllerToolAdapter {
    pub fn new(controller: Arc<dyn Controller>) -> Self {
        Self { controller }
    }
}

/// Wrap a controller as a registerable tool handler.
pub fn adapt_controller(controller: Arc<dyn Controller>) -> Arc<dyn ToolHandler> {
    Arc::new(ControllerToolAdapter::new(controller))
}

#[async_trait]
impl ToolHandler for ControllerToolAdapter {
    async fn call(&self, arguments: Value) -> std::result::Result<Value, McpError> {
        let response = self.controller.handle(Request::new(arguments)).await;
        let text = body_text(&response.body)?;

        if response.is_success() {
            serde_json::to_value(ToolResult::text(text))
                .map_err(|e| McpError::internal(e.to_string()))
        } else if response.is_client_error() {
            Err(McpError::invalid_params(format!("Validation error: {text}")))
        } else {
            Err(McpError::internal(text))
        }
    }
}

/// String bodies pass through unchanged; structured bodies are rendered as
/// pretty JSON so list results stay readable in clients.
fn body_text(body: &Value) -> std::result::Result<String, McpError> {
    match body {
        Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string_pretty(other).map_err(|e| McpError::internal(e.to_string())),
    }
}
