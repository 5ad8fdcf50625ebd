//! Connection lifecycle
//!
//! ```text
//! Disconnected ──connect──► Connecting ──first frame──► Connected
//!      ▲                      │   │                        │
//!      └──────failed──────────┘   └──────close──► Closed ◄─┘
//!                                                   │
//!                       Connecting ◄───restart──────┘
//! ```

use tracing::{debug, info};

use crate::{TransportError, TransportResult};

/// Normal closure status code
pub const NORMAL_CLOSURE: u16 = 1000;

/// Reason sent with a normal closure
pub const CLOSE_REASON: &str = "Done";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Closed,
}

impl ConnectionState {
    /// Whether `self -> to` is a legal transition
    pub fn can_transition(self, to: ConnectionState) -> bool {
        use ConnectionState::*;
        matches!(
            (self, to),
            (Disconnected, Connecting)
                | (Closed, Connecting)
                | (Connecting, Connected)
                | (Connecting, Disconnected)
                | (Connecting, Closed)
                | (Connected, Closed)
        )
    }
}

/// Close frame sent when the caller stops
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseFrame {
    pub code: u16,
    pub reason: String,
}

impl CloseFrame {
    pub fn normal() -> Self {
        Self {
            code: NORMAL_CLOSURE,
            reason: CLOSE_REASON.to_string(),
        }
    }
}

/// Connection state holder
#[derive(Debug, Default)]
pub struct Connection {
    state: ConnectionState,
    endpoint: String,
    attempts: u32,
}

impl Connection {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            endpoint: endpoint.into(),
            attempts: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Number of connect attempts so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    fn transition(&mut self, to: ConnectionState) -> TransportResult<()> {
        if !self.state.can_transition(to) {
            return Err(TransportError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        info!("{}: {:?} -> {:?}", self.endpoint, self.state, to);
        self.state = to;
        Ok(())
    }

    /// Start (or restart after close) a connection attempt
    pub fn begin_connect(&mut self) -> TransportResult<()> {
        self.transition(ConnectionState::Connecting)?;
        self.attempts += 1;
        debug!("connect attempt {} to {}", self.attempts, self.endpoint);
        Ok(())
    }

    /// First decoded frame observed
    pub fn mark_connected(&mut self) -> TransportResult<()> {
        self.transition(ConnectionState::Connected)
    }

    /// Connect attempt failed before any frame arrived
    pub fn connect_failed(&mut self) -> TransportResult<()> {
        self.transition(ConnectionState::Disconnected)
    }

    /// Close the connection. Returns the close frame to send.
    pub fn close(&mut self) -> TransportResult<CloseFrame> {
        self.transition(ConnectionState::Closed)?;
        Ok(CloseFrame::normal())
    }
}
