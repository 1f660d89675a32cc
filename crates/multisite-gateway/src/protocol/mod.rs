//! Gateway protocol definitions
//!
//! Frames are JSON objects `{op, t?, s?, d?}`. Pages only ever send
//! heartbeats; the gateway sends Hello, heartbeat acks and `SITE_UPDATE`
//! dispatches.

mod close_codes;
mod messages;
mod opcodes;
mod payloads;

pub use close_codes::CloseCode;
pub use messages::GatewayMessage;
pub use opcodes::{OpCode, UnknownOp};
pub use payloads::HelloPayload;
