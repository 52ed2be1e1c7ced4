//! Application layer for Context Bank
//!
//! Sits between the MCP dispatch layer and the filesystem storage in
//! `bank-fs`:
//!
//! ```text
//! [ bank-mcp (transport + dispatch) ]
//!        | Controller::handle(Request) -> Response
//!        v
//! [ bank-core (controllers -> validators -> use cases) ]
//!        |
//!        v
//! [ bank-fs (project/file repositories) ]
//! ```
//!
//! Controllers never let a failure escape as a panic or error return: every
//! outcome is a [`http::Response`] whose status code classifies it
//! (2xx success, 4xx validation/client, 5xx internal).

pub mod controllers;
pub mod error;
pub mod factory;
pub mod http;
pub mod usecases;
pub mod validation;

pub use error::{Error, Result};
pub use http::{Controller, Request, Response};
