//! Error types and the protocol error mapper

use thiserror::Error;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the MCP server. Only startup and
/// shutdown paths surface these; everything on the request path is mapped
/// to a protocol error envelope instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Could not bind the configured listen address
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Bad configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The fixed taxonomy of protocol failures, mapped to JSON-RPC codes.
///
/// Malformed request bodies deliberately land in the internal family
/// rather than a distinct invalid-request code; clients only ever branch
/// on the presence of the `error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unknown top-level method or unregistered tool name
    MethodNotFound,
    /// Arguments rejected by validation
    InvalidParams,
    /// Handler failure, unparseable body, or transport not ready
    InternalError,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
        }
    }
}

/// A protocol-level failure: code family plus a human message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct McpError {
    pub code: ErrorCode,
    pub message: String,
}

impl McpError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MethodNotFound, message)
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}
