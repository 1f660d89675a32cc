//! Live public page view
//!
//! Connects to `/realtime?domain=...`, heartbeats at the interval the gateway
//! announces and applies every `SITE_UPDATE` to a [`PublicPageView`]. The
//! connection is not retried; once it drops the view keeps its last values.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use multisite_core::{PublicPageView, SiteUpdatedEvent, SITE_UPDATE};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, timeout, Instant};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use super::{GatewayError, GatewayResult};
use crate::protocol::{GatewayMessage, HelloPayload, OpCode};

/// How long to wait for Hello after connecting
pub const HELLO_TIMEOUT: Duration = Duration::from_secs(10);

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A [`PublicPageView`] kept current by the gateway
///
/// Dropping it closes the connection.
pub struct LiveSiteView {
    view: watch::Receiver<PublicPageView>,
    connected: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl LiveSiteView {
    /// Open a subscription for the view's domain.
    ///
    /// `gateway_url` is the gateway's public base URL, e.g. `ws://127.0.0.1:3001`.
    pub async fn connect(gateway_url: &str, view: PublicPageView) -> GatewayResult<Self> {
        let url = format!(
            "{}/realtime?domain={}",
            gateway_url.trim_end_matches('/'),
            view.domain()
        );

        tracing::debug!(url = %url, "Connecting to gateway");
        let (socket, _response) = connect_async(url).await?;
        let (sink, mut stream) = socket.split();

        let hello = timeout(HELLO_TIMEOUT, read_hello(&mut stream))
            .await
            .map_err(|_| GatewayError::HelloTimeout)??;
        let heartbeat = Duration::from_millis(hello.heartbeat_interval.max(1));

        tracing::debug!(
            domain = %view.domain(),
            heartbeat_ms = hello.heartbeat_interval,
            "Gateway session started"
        );

        let (view_tx, view_rx) = watch::channel(view);
        let connected = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&connected);
        let task = tokio::spawn(async move {
            run_session(sink, stream, view_tx, heartbeat).await;
            flag.store(false, Ordering::SeqCst);
        });

        Ok(Self {
            view: view_rx,
            connected,
            task,
        })
    }

    /// Current state of the page
    pub fn view(&self) -> PublicPageView {
        self.view.borrow().clone()
    }

    /// Receiver that is notified whenever an update changes the page
    pub fn subscribe(&self) -> watch::Receiver<PublicPageView> {
        self.view.clone()
    }

    /// Whether the gateway connection is still open
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl Drop for LiveSiteView {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for LiveSiteView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveSiteView")
            .field("view", &*self.view.borrow())
            .field("connected", &self.is_connected())
            .finish()
    }
}

async fn read_hello(stream: &mut SplitStream<Socket>) -> GatewayResult<HelloPayload> {
    while let Some(frame) = stream.next().await {
        match frame? {
            WsMessage::Text(text) => {
                let message = GatewayMessage::from_json(&text)?;
                return message.as_hello().ok_or(GatewayError::UnexpectedFrame {
                    expected: "Hello",
                    op: message.op.to_string(),
                });
            }
            WsMessage::Binary(_) => {
                return Err(GatewayError::UnexpectedFrame {
                    expected: "Hello",
                    op: "binary".to_string(),
                });
            }
            WsMessage::Close(_) => return Err(GatewayError::ClosedBeforeHello),
            _ => {}
        }
    }
    Err(GatewayError::ClosedBeforeHello)
}

async fn run_session(
    mut sink: SplitSink<Socket, WsMessage>,
    mut stream: SplitStream<Socket>,
    view: watch::Sender<PublicPageView>,
    heartbeat: Duration,
) {
    let mut ticker = interval_at(Instant::now() + heartbeat, heartbeat);
    let mut last_sequence: Option<u64> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let json = match GatewayMessage::heartbeat(last_sequence).to_json() {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to encode heartbeat");
                        continue;
                    }
                };
                if sink.send(WsMessage::Text(json)).await.is_err() {
                    break;
                }
            }
            frame = stream.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => handle_frame(&text, &view, &mut last_sequence),
                Some(Ok(WsMessage::Close(frame))) => {
                    tracing::debug!(frame = ?frame, "Gateway closed the connection");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "Gateway connection failed");
                    break;
                }
                None => break,
            }
        }
    }
}

fn handle_frame(text: &str, view: &watch::Sender<PublicPageView>, last_sequence: &mut Option<u64>) {
    let message = match GatewayMessage::from_json(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring undecodable gateway frame");
            return;
        }
    };

    match message.op {
        OpCode::Dispatch => {
            if message.s.is_some() {
                *last_sequence = message.s;
            }
            if !message.is_dispatch_of(SITE_UPDATE) {
                return;
            }
            let Some(data) = message.d else {
                return;
            };
            match serde_json::from_value::<SiteUpdatedEvent>(data) {
                Ok(event) => {
                    if view.send_if_modified(|page| page.apply_update(&event)) {
                        tracing::debug!(domain = %event.domain, "Applied site update");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Ignoring malformed SITE_UPDATE"),
            }
        }
        OpCode::HeartbeatAck => tracing::trace!("Heartbeat acknowledged"),
        op => tracing::debug!(op = %op, "Ignoring unexpected gateway frame"),
    }
}
