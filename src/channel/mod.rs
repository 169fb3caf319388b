//! Live-Update Channel
//!
//! Each instance owns one bidirectional WebSocket connection: it connects,
//! reports state transitions and inbound frames through a single handler
//! record, and schedules its own reconnects when the transport drops. The
//! [`bridge`] adapts those push callbacks into a snapshot/subscribe contract
//! for rendering code.

pub mod bridge;
pub mod retry;
pub mod socket;
pub mod timer;
pub mod transport;

pub use bridge::{Bridge, Snapshot, Subscription};
pub use retry::RetryPolicy;
pub use socket::{Channel, ChannelConfig, ChannelHandlers};

use thiserror::Error;

/// Lifecycle state of a channel. Mutated only by the channel itself on
/// transport events; consumers observe it, they never set it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
    Retrying,
}

impl ConnectionState {
    /// Human-readable status for the connection indicator.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "Connecting",
            ConnectionState::Open => "Connected",
            ConnectionState::Closed => "Disconnected",
            ConnectionState::Retrying => "Reconnecting",
        }
    }

    pub fn is_open(self) -> bool {
        self == ConnectionState::Open
    }
}

/// Channel-level failures. None of these cross into view code as faults;
/// they surface as state changes or console reports.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// `send` was called while the channel was not `Open`. The frame is
    /// dropped, never queued.
    #[error("channel is not open")]
    NotConnected,
    /// Transport-level failure. The close event that follows drives the
    /// retry; this is informational.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// An inbound frame that could not be decoded into a typed message. The
/// frame is skipped; the connection stays up.
#[derive(Debug, Error)]
#[error("malformed frame: {0}")]
pub struct DecodeError(#[from] serde_json::Error);
