//! Runtime configuration
//!
//! Resolution order for every setting: command-line flag, then
//! environment, then default. The storage root has no default; starting
//! without one is a configuration error.

use std::path::PathBuf;

use crate::transport::TransportConfig;
use crate::{Error, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ENDPOINT: &str = "/mcp";

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub root_path: PathBuf,
    pub server_port: u16,
    pub sse_endpoint: String,
}

/// Unresolved settings from the command line; `None` falls through to the
/// environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub port: Option<u16>,
    pub endpoint: Option<String>,
}

impl Config {
    /// Resolve from overrides and the process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self> {
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Resolve against an explicit environment lookup. Split out from
    /// [`from_env`](Self::from_env) so tests never touch process globals.
    pub fn resolve(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let root_path = overrides
            .root
            .or_else(|| env("CONTEXT_BANK_ROOT").map(PathBuf::from))
            .or_else(|| env("MEMORY_BANK_ROOT").map(PathBuf::from))
            .ok_or_else(|| {
                Error::Config(
                    "no storage root configured; set CONTEXT_BANK_ROOT or pass --root".to_string(),
                )
            })?;

        let server_port = match overrides.port {
            Some(port) => port,
            None => match env("SERVER_PORT") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| Error::Config(format!("invalid SERVER_PORT value: {raw}")))?,
                None => DEFAULT_PORT,
            },
        };

        let sse_endpoint = overrides
            .endpoint
            .or_else(|| env("SSE_ENDPOINT"))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        if !sse_endpoint.starts_with('/') {
            return Err(Error::Config(format!(
                "endpoint must start with '/': {sse_endpoint}"
            )));
        }

        Ok(Self {
            root_path,
            server_port,
            sse_endpoint,
        })
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            port: self.server_port,
            endpoint: self.sse_endpoint.clone(),
            ..TransportConfig::default()
        }
    }

}
