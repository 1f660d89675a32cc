//! Frame op codes

use serde::{Deserialize, Serialize};

/// What a frame means. Serialized as its bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OpCode {
    /// `SITE_UPDATE` and other events, gateway to page
    Dispatch,
    /// Keep-alive, page to gateway
    Heartbeat,
    /// First frame after the upgrade
    Hello,
    HeartbeatAck,
}

/// Raw op value that is not part of the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid op code: {0}")]
pub struct UnknownOp(pub u8);

impl OpCode {
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Dispatch => 0,
            Self::Heartbeat => 1,
            Self::Hello => 10,
            Self::HeartbeatAck => 11,
        }
    }

    /// Pages may only send heartbeats
    #[must_use]
    pub const fn sent_by_page(self) -> bool {
        matches!(self, Self::Heartbeat)
    }
}

impl TryFrom<u8> for OpCode {
    type Error = UnknownOp;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        [Self::Dispatch, Self::Heartbeat, Self::Hello, Self::HeartbeatAck]
            .into_iter()
            .find(|op| op.value() == raw)
            .ok_or(UnknownOp(raw))
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op.value()
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}/{}", self.value())
    }
}
