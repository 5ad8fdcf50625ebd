//! Transport errors

use thiserror::Error;

use crate::ConnectionState;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid connection transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: ConnectionState,
        to: ConnectionState,
    },

    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Message is not a JSON object")]
    NotAnObject,

    #[error("Channel closed")]
    ChannelClosed,
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
