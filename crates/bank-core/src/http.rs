//! The controller contract and response helpers
//!
//! Controllers receive the raw JSON arguments of a tool invocation and
//! answer with a status code plus a JSON body. Failures are reported as
//! status classes, never as errors thrown across this boundary.

use async_trait::async_trait;
use serde_json::Value;

/// An inbound controller request. The body is the tool invocation's
/// `arguments` object (or `null` when the client sent none).
#[derive(Debug, Clone)]
pub struct Request {
    pub body: Value,
}

impl Request {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Fetch a string field from the body.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }
}

/// A controller response: a status indicator and a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub body: Value,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }
}

/// 200 with the given body.
pub fn ok(body: impl Into<Value>) -> Response {
    Response {
        status_code: 200,
        body: body.into(),
    }
}

/// 400 with a validation message body.
pub fn bad_request(message: impl Into<String>) -> Response {
    Response {
        status_code: 400,
        body: Value::String(message.into()),
    }
}

/// 500 with a failure message body.
pub fn server_error(message: impl std::fmt::Display) -> Response {
    Response {
        status_code: 500,
        body: Value::String(message.to_string()),
    }
}

/// A named remote operation's implementation.
#[async_trait]
pub trait Controller: Send + Sync {
    async fn handle(&self, request: Request) -> Response;
}
