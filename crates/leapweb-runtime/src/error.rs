//! Runtime errors

use thiserror::Error;

use leapweb_core::DecodeError;
use leapweb_transport::TransportError;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
