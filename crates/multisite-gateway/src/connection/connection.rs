//! Individual WebSocket connection
//!
//! One open public page listening on a single domain.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::protocol::{CloseCode, GatewayMessage};

/// What the writer task puts on the socket next
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Frame(GatewayMessage),
    /// Send a close frame and stop writing
    Close(CloseCode),
}

/// A single WebSocket connection
pub struct Connection {
    /// Unique connection ID
    id: String,

    /// Domain key the page listens on (lowercase)
    domain: String,

    /// Channel to the writer task
    sender: mpsc::Sender<Outbound>,

    /// Last dispatch sequence number sent
    sequence: AtomicU64,

    /// Last heartbeat received
    last_heartbeat: Mutex<Instant>,

    created_at: Instant,
}

impl Connection {
    pub fn new(id: String, domain: String, sender: mpsc::Sender<Outbound>) -> Arc<Self> {
        let now = Instant::now();
        Arc::new(Self {
            id,
            domain,
            sender,
            sequence: AtomicU64::new(0),
            last_heartbeat: Mutex::new(now),
            created_at: now,
        })
    }

    /// Generate a new connection ID
    #[must_use]
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Get the next sequence number
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Get the current sequence number
    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Record a heartbeat received
    pub fn record_heartbeat(&self) {
        *self.last_heartbeat.lock() = Instant::now();
    }

    /// Get time since last heartbeat (or since connect, before the first one)
    pub fn time_since_heartbeat(&self) -> Duration {
        self.last_heartbeat.lock().elapsed()
    }

    fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Send a message to this connection
    pub async fn send(
        &self,
        message: GatewayMessage,
    ) -> Result<(), mpsc::error::SendError<Outbound>> {
        self.sender.send(Outbound::Frame(message)).await
    }

    /// Queue a dispatch without waiting, stamping this connection's next sequence.
    ///
    /// Returns `false` when the writer is gone or its buffer is full; the event
    /// is then dropped for this page only.
    pub fn dispatch(&self, event_type: &str, data: Value) -> bool {
        let message = GatewayMessage::dispatch(event_type, self.next_sequence(), data);
        match self.sender.try_send(Outbound::Frame(message)) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    connection_id = %self.id,
                    error = %e,
                    "Dropping dispatch for connection"
                );
                false
            }
        }
    }

    /// Ask the writer task to close the socket with `code`
    pub async fn close(&self, code: CloseCode) -> Result<(), mpsc::error::SendError<Outbound>> {
        self.sender.send(Outbound::Close(code)).await
    }

    /// Check if the writer task has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("domain", &self.domain)
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .field("age", &self.age())
            .finish()
    }
}
