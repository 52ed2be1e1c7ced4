//! Controllers for the context tools
//!
//! Each controller validates the raw arguments, delegates to its use case,
//! and classifies the outcome as a status code. Nothing here panics on bad
//! input or storage failure; the worst outcome is a 500 response.

mod files;
mod listing;
mod retrieve;

pub use files::{ReadController, UpdateController, WriteController};
pub use listing::{ListProjectFilesController, ListProjectsController};
pub use retrieve::RetrieveContextController;

use crate::http::{bad_request, server_error, Request, Response};
use crate::Error;

/// Extract a required string field, or the 400 response to return instead.
fn require_str<'a>(request: &'a Request, field: &str) -> Result<&'a str, Response> {
    request
        .str_field(field)
        .ok_or_else(|| bad_request(format!("Missing required parameter: {field}")))
}

/// Map a use-case failure to a response by fault class.
fn respond_error(error: Error) -> Response {
    if error.is_client_fault() {
        bad_request(error.to_string())
    } else {
        tracing::error!(%error, "use case failed");
        server_error(error)
    }
}
