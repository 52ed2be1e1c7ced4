//! Tool descriptor and result types

use serde::{Deserialize, Serialize};

/// Describes one registered tool: its unique name, a human description,
/// and the JSON schema of its arguments. Immutable after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// The MCP-shaped payload a tool invocation produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// A successful text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_serializes_camel_case_schema() {
        let descriptor = ToolDescriptor {
            name: "context_read".to_string(),
            description: "Read a context file".to_string(),
            input_schema: json!({"type": "object"}),
        };
        let value = serde_json::to_value(&descriptor).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn text_result_shape() {
        let result = ToolResult::text("done");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "done"}]})
        );
    }
}
