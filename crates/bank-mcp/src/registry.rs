//! Registry of open SSE push channels
//!
//! Tracks every live connection by id and fans server-originated events out
//! to them. Mutations arrive from several task contexts (stream open,
//! stream drop, keep-alive expiry, shutdown), so the backing map sits
//! behind a mutex. All operations are total: there is no error path, only
//! silently skipped dead sinks.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use axum::response::sse::Event;
use serde_json::Value;
use tokio::sync::mpsc;

/// One open push channel: its id and the sink events are written to.
pub struct SseConnection {
    id: String,
    sender: mpsc::UnboundedSender<Event>,
}

impl SseConnection {
    pub fn new(id: impl Into<String>, sender: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            id: id.into(),
            sender,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the client end of the channel is still attached.
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Write one event; `false` when the sink has gone away.
    fn send(&self, event: Event) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Build an SSE frame: `event: <name>\ndata: <json>\n\n`.
pub fn sse_event(name: &str, payload: &Value) -> Event {
    Event::default().event(name).data(payload.to_string())
}

#[derive(Default)]
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<String, SseConnection>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new connection. Registering an id twice is a programming
    /// error and panics.
    pub fn register(&self, connection: SseConnection) {
        let id = connection.id().to_string();
        let previous = self.lock().insert(id.clone(), connection);
        assert!(previous.is_none(), "duplicate connection id: {id}");
    }

    /// Remove a connection. A no-op when the id is already gone, so the
    /// keep-alive loop and the stream-drop guard can both call it.
    pub fn unregister(&self, id: &str) {
        self.lock().remove(id);
    }

    /// Write a push frame to every live connection, skipping any whose
    /// sink has closed. One dead sink never stops delivery to the rest.
    pub fn broadcast(&self, event: &str, payload: &Value) {
        let map = self.lock();
        for connection in map.values() {
            if connection.is_open() && !connection.send(sse_event(event, payload)) {
                tracing::debug!(connection_id = %connection.id(), "skipped closed sink");
            }
        }
    }

    /// Write one event to a single connection; `false` when the connection
    /// is gone or its sink is closed.
    pub fn send_to(&self, id: &str, event: Event) -> bool {
        match self.lock().get(id) {
            Some(connection) => connection.send(event),
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Drop every connection, ending all open streams. Used at shutdown.
    pub fn close_all(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SseConnection>> {
        // A poisoned lock means a panic mid-mutation on a HashMap of
        // senders; the map is still structurally sound.
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
