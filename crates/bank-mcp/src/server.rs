//! Server assembly
//!
//! Binds the dispatcher to an identity and plugs it into the transport as
//! its request processor.

use std::sync::Arc;

use async_trait::async_trait;

use crate::protocol::{JsonRpcRequest, JsonRpcResponse, ServerInfo};
use crate::router::McpRouter;
use crate::transport::{RequestProcessor, SseServerTransport, TransportConfig};
use crate::Result;

/// The protocol-facing server: a dispatcher plus the identity it reports
/// during initialization.
pub struct McpServer {
    router: McpRouter,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(router: McpRouter, info: ServerInfo) -> Self {
        Self { router, info }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn tool_count(&self) -> usize {
        self.router.tool_count()
    }

    /// Start a transport with this server attached as its processor.
    /// Returns the running transport; callers own its shutdown.
    pub async fn serve(self, config: TransportConfig) -> Result<SseServerTransport> {
        let mut transport = SseServerTransport::new(config);
        transport.set_request_processor(Arc::new(self));
        transport.start().await?;
        Ok(transport)
    }
}

#[async_trait]
impl RequestProcessor for McpServer {
    async fn process(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        self.router.dispatch(request, &self.info).await
    }
}
