//! Op code handlers
//!
//! Handles frames sent by pages based on their operation code.

mod error;
mod heartbeat;

pub use error::{HandlerError, HandlerResult};
pub use heartbeat::HeartbeatHandler;

use crate::connection::Connection;
use crate::protocol::{CloseCode, GatewayMessage, OpCode};

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle an incoming client message.
    ///
    /// `Ok(Some(code))` asks the caller to close the connection with `code`.
    pub async fn dispatch(
        connection: &Connection,
        message: GatewayMessage,
    ) -> HandlerResult<Option<CloseCode>> {
        if !message.op.sent_by_page() {
            tracing::warn!(
                connection_id = %connection.id(),
                op = %message.op,
                "Received server-only op code from client"
            );
            return Ok(Some(CloseCode::UnknownOpcode));
        }

        match message.op {
            OpCode::Heartbeat => {
                let seq = message.as_heartbeat_seq().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid Heartbeat payload".to_string())
                })?;

                HeartbeatHandler::handle(connection, seq).await
            }
            OpCode::Dispatch | OpCode::Hello | OpCode::HeartbeatAck => Ok(Some(CloseCode::UnknownOpcode)),
        }
    }
}
