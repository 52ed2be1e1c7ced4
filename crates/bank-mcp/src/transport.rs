//! Hybrid SSE/POST HTTP transport
//!
//! GET on the configured endpoint opens a long-lived event stream that
//! carries a `connected` event immediately and `ping` events on a fixed
//! period. POST on the same endpoint is a plain one-shot JSON-RPC
//! exchange. The two sides share nothing beyond the connection registry;
//! a client may POST without ever opening a stream.
//!
//! Protocol failures on the POST path always come back as HTTP 200 with
//! an error envelope. The only non-200 statuses this transport produces
//! are 404 for unknown routes.
//!
//! No timeout is enforced on POST bodies; a slow client can hold its
//! transaction open indefinitely. Known hardening gap for untrusted
//! deployments.

use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures_util::Stream;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::registry::{sse_event, ConnectionRegistry, SseConnection};
use crate::{Error, ErrorCode, Result};

/// Listen address and endpoint settings for the transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub hostname: String,
    pub port: u16,
    pub endpoint: String,
    pub ping_interval: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            hostname: "0.0.0.0".to_string(),
            port: 8080,
            endpoint: "/mcp".to_string(),
            ping_interval: Duration::from_secs(30),
        }
    }
}

/// Consumes one parsed invocation envelope and produces the response
/// envelope. The transport stays ignorant of methods and tools; this is
/// its only seam to the protocol layer.
#[async_trait]
pub trait RequestProcessor: Send + Sync {
    async fn process(&self, request: JsonRpcRequest) -> JsonRpcResponse;
}

struct AppState {
    registry: Arc<ConnectionRegistry>,
    processor: RwLock<Option<Arc<dyn RequestProcessor>>>,
    ping_interval: Duration,
}

impl AppState {
    fn processor(&self) -> Option<Arc<dyn RequestProcessor>> {
        self.processor
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// The HTTP server owning the SSE channels and the POST exchange path.
///
/// Lifecycle: construct, attach a [`RequestProcessor`], `start`, and
/// eventually `stop`. Starting without a processor is allowed; POSTs then
/// receive an internal-error envelope until one is attached.
pub struct SseServerTransport {
    state: Arc<AppState>,
    config: TransportConfig,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    port: Option<u16>,
}

impl SseServerTransport {
    pub fn new(config: TransportConfig) -> Self {
        let state = Arc::new(AppState {
            registry: Arc::new(ConnectionRegistry::new()),
            processor: RwLock::new(None),
            ping_interval: config.ping_interval,
        });
        Self {
            state,
            config,
            shutdown_tx: None,
            handle: None,
            port: None,
        }
    }

    pub fn set_request_processor(&self, processor: Arc<dyn RequestProcessor>) {
        *self
            .state
            .processor
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(processor);
    }

    /// Bind the listener and serve until [`stop`](Self::stop) is called.
    /// Returns once the socket is bound; serving continues on a background
    /// task. Port 0 binds an ephemeral port, readable via [`port`](Self::port).
    pub async fn start(&mut self) -> Result<()> {
        let addr = format!("{}:{}", self.config.hostname, self.config.port);
        let listener = TcpListener::bind(&addr).await.map_err(|source| Error::Bind {
            addr: addr.clone(),
            source,
        })?;
        let local_addr = listener.local_addr().map_err(|source| Error::Bind {
            addr: addr.clone(),
            source,
        })?;
        self.port = Some(local_addr.port());

        let router = Router::new()
            .route(
                &self.config.endpoint,
                get(open_stream).post(handle_message).options(preflight),
            )
            .fallback(fallback)
            .with_state(self.state.clone());

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        self.shutdown_tx = Some(shutdown_tx);

        tracing::info!(%local_addr, endpoint = %self.config.endpoint, "transport listening");
        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            });
            if let Err(e) = serve.await {
                tracing::error!(error = %e, "transport server terminated");
            }
        });
        self.handle = Some(handle);
        Ok(())
    }

    /// Signal shutdown, drop every open stream, and wait for the serve
    /// task to finish. Safe to call when never started.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
        self.state.registry.close_all();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "serve task did not shut down cleanly");
            }
        }
        tracing::info!("transport stopped");
    }

    /// The actually-bound port, once started.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn connection_count(&self) -> usize {
        self.state.registry.count()
    }

    /// Push a named event to every open stream.
    pub fn broadcast(&self, event: &str, payload: &Value) {
        self.state.registry.broadcast(event, payload);
    }
}

/// Stream of push events for one connection. Dropping it (client went
/// away) releases the registry entry and cancels the keep-alive task.
struct ConnectionStream {
    rx: mpsc::UnboundedReceiver<Event>,
    _guard: ConnectionGuard,
}

impl Stream for ConnectionStream {
    type Item = std::result::Result<Event, std::convert::Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx).map(|event| event.map(Ok))
    }
}

struct ConnectionGuard {
    registry: Arc<ConnectionRegistry>,
    connection_id: String,
    keep_alive: JoinHandle<()>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.keep_alive.abort();
        self.registry.unregister(&self.connection_id);
        tracing::info!(connection_id = %self.connection_id, "sse connection closed");
    }
}

fn new_connection_id() -> String {
    format!(
        "conn_{}_{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple()
    )
}

async fn open_stream(State(state): State<Arc<AppState>>) -> Response {
    let connection_id = new_connection_id();
    let (tx, rx) = mpsc::unbounded_channel();

    // Register before handing the stream to axum so a broadcast issued
    // right after this response reaches the new connection.
    state
        .registry
        .register(SseConnection::new(&connection_id, tx));
    tracing::info!(connection_id = %connection_id, "sse connection opened");

    let connected = sse_event("connected", &json!({ "connectionId": connection_id }));
    if !state.registry.send_to(&connection_id, connected) {
        state.registry.unregister(&connection_id);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let keep_alive = tokio::spawn(keep_alive_loop(
        state.registry.clone(),
        connection_id.clone(),
        state.ping_interval,
    ));

    let stream = ConnectionStream {
        rx,
        _guard: ConnectionGuard {
            registry: state.registry.clone(),
            connection_id,
            keep_alive,
        },
    };

    let mut response = Sse::new(stream).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    insert_cors(&mut response);
    response
}

/// Send a `ping` on every period until the connection stops accepting
/// events, then drop the registry entry.
async fn keep_alive_loop(registry: Arc<ConnectionRegistry>, id: String, period: Duration) {
    loop {
        tokio::time::sleep(period).await;
        let ping = sse_event("ping", &json!({ "timestamp": chrono::Utc::now().timestamp_millis() }));
        if !registry.send_to(&id, ping) {
            break;
        }
    }
    registry.unregister(&id);
}

async fn handle_message(State(state): State<Arc<AppState>>, body: String) -> Response {
    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable request body");
            // Best-effort id salvage so the client can still correlate.
            let id = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("id").cloned())
                .filter(|id| !id.is_null());
            let response = JsonRpcResponse::error(
                id,
                ErrorCode::InternalError,
                format!("Internal error: {e}"),
            );
            return json_response(&response);
        }
    };

    let response = match state.processor() {
        Some(processor) => processor.process(request).await,
        None => JsonRpcResponse::error(
            request.id,
            ErrorCode::InternalError,
            "Request processor not initialized",
        ),
    };
    json_response(&response)
}

async fn preflight() -> Response {
    let mut response = StatusCode::OK.into_response();
    insert_cors(&mut response);
    response
}

/// Unknown routes: preflights still succeed everywhere, everything else
/// is a plain 404.
async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight().await;
    }
    let mut response = (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "Not Found",
    )
        .into_response();
    insert_cors(&mut response);
    response
}

fn json_response(response: &JsonRpcResponse) -> Response {
    let body = match serde_json::to_string(response) {
        Ok(body) => body,
        // Response types hold only serializable data; treat failure the
        // same as any other internal fault.
        Err(e) => format!(
            r#"{{"jsonrpc":"2.0","id":null,"error":{{"code":-32603,"message":"Internal error: {e}"}}}}"#
        ),
    };
    let mut http = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response());
    insert_cors(&mut http);
    http
}

fn insert_cors(response: &mut Response) {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}
