//! WebSocket handler
//!
//! Accepts `/realtime?domain=...`, greets the page with Hello and keeps the
//! socket alive until the page leaves, stops heartbeating or misbehaves.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use multisite_core::SiteSlot;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use crate::connection::{Connection, Outbound};
use crate::handlers::MessageDispatcher;
use crate::protocol::{CloseCode, GatewayMessage, HelloPayload};
use crate::server::GatewayState;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// How long the writer gets to flush a close frame
const CLOSE_GRACE: Duration = Duration::from_secs(1);

const MIN_HEARTBEAT_CHECK: Duration = Duration::from_millis(10);

#[derive(Debug, Deserialize)]
pub struct RealtimeQuery {
    pub domain: Option<String>,
}

/// WebSocket gateway handler
///
/// The domain is checked before the upgrade so unknown pages never get a socket.
pub async fn realtime_handler(
    State(state): State<GatewayState>,
    Query(query): Query<RealtimeQuery>,
    ws: Option<WebSocketUpgrade>,
) -> Response {
    let Some(slot) = query.domain.as_deref().and_then(SiteSlot::by_domain) else {
        tracing::debug!(domain = ?query.domain, "Rejected realtime request");
        return (StatusCode::BAD_REQUEST, "Unknown or missing domain").into_response();
    };

    let Some(ws) = ws else {
        return (StatusCode::UPGRADE_REQUIRED, "Expected a WebSocket upgrade").into_response();
    };

    let domain = slot.domain;
    ws.on_upgrade(move |socket| handle_socket(state, socket, domain))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket, domain: &'static str) {
    let settings = state.settings();
    let (tx, mut rx) = mpsc::channel::<Outbound>(MESSAGE_BUFFER_SIZE);

    let guard = state.connection_manager().register(domain, tx);
    let connection = Arc::clone(guard.connection());
    let connection_id = connection.id().to_string();

    tracing::info!(connection_id = %connection_id, domain = %domain, "Page connected");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let interval_ms = u64::try_from(settings.heartbeat_interval.as_millis()).unwrap_or(u64::MAX);
    let hello = GatewayMessage::hello(HelloPayload::with_interval(interval_ms));
    let sent = match hello.to_json() {
        Ok(json) => ws_sink.send(Message::Text(json)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode Hello");
            false
        }
    };
    if !sent {
        tracing::warn!(connection_id = %connection_id, "Failed to send Hello message");
        return;
    }

    let connection_recv = Arc::clone(&connection);
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if let Err(close_code) = handle_text_message(&connection_recv, &text).await {
                        return Some(close_code);
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        "Binary messages not supported"
                    );
                    return Some(CloseCode::DecodeError);
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection_id = %connection_recv.id(), "Page closed connection");
                    return None;
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        error = %e,
                        "WebSocket error"
                    );
                    return None;
                }
            }
        }
        None
    });

    let connection_send = Arc::clone(&connection);
    let mut send_task = tokio::spawn(async move {
        while let Some(outbound) = rx.recv().await {
            match outbound {
                Outbound::Frame(message) => {
                    let json = match message.to_json() {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to encode frame");
                            continue;
                        }
                    };
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        tracing::debug!(
                            connection_id = %connection_send.id(),
                            "Failed to send message to WebSocket"
                        );
                        break;
                    }
                }
                Outbound::Close(code) => {
                    let frame = CloseFrame {
                        code: code.as_u16(),
                        reason: Cow::Borrowed(code.description()),
                    };
                    let _ = ws_sink.send(Message::Close(Some(frame))).await;
                    break;
                }
            }
        }
    });

    let connection_hb = Arc::clone(&connection);
    let mut heartbeat_task = tokio::spawn(async move {
        let mut check = interval((settings.heartbeat_interval / 2).max(MIN_HEARTBEAT_CHECK));
        check.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            check.tick().await;

            let silent = connection_hb.time_since_heartbeat();
            if silent > settings.heartbeat_timeout {
                tracing::info!(
                    connection_id = %connection_hb.id(),
                    silent_ms = silent.as_millis(),
                    "Connection timed out (no heartbeat)"
                );
                return CloseCode::SessionTimeout;
            }
        }
    });

    let close_code = tokio::select! {
        result = &mut recv_task => result.ok().flatten(),
        _ = &mut send_task => None,
        result = &mut heartbeat_task => result.ok(),
    };

    if let Some(code) = close_code {
        tracing::debug!(connection_id = %connection_id, close_code = %code, "Closing connection");
        if connection.close(code).await.is_ok()
            && tokio::time::timeout(CLOSE_GRACE, &mut send_task).await.is_err()
        {
            tracing::debug!(connection_id = %connection_id, "Close frame not flushed in time");
        }
    }

    recv_task.abort();
    send_task.abort();
    heartbeat_task.abort();
    drop(guard);

    tracing::info!(connection_id = %connection_id, domain = %domain, "Page disconnected");
}

/// Handle a text frame from the page
async fn handle_text_message(connection: &Connection, text: &str) -> Result<(), CloseCode> {
    let message = GatewayMessage::decode(text).inspect_err(|code| {
        tracing::debug!(
            connection_id = %connection.id(),
            close_code = %code,
            "Failed to decode frame"
        );
    })?;

    match MessageDispatcher::dispatch(connection, message).await {
        Ok(Some(close_code)) => Err(close_code),
        Ok(None) => Ok(()),
        Err(e) => {
            tracing::warn!(
                connection_id = %connection.id(),
                error = %e,
                "Handler error"
            );
            Err(e.to_close_code())
        }
    }
}
