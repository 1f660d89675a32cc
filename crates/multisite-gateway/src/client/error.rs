//! Client error types

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Failure to establish a live view
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] Box<tungstenite::Error>),

    #[error("Failed to decode frame: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Expected {expected}, got op {op}")]
    UnexpectedFrame { expected: &'static str, op: String },

    #[error("Connection closed before Hello")]
    ClosedBeforeHello,

    #[error("Timed out waiting for Hello")]
    HelloTimeout,
}

impl From<tungstenite::Error> for GatewayError {
    fn from(err: tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
