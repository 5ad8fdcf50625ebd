//! leapweb Transport - everything between the tracking service and the decoder
//!
//! This crate provides:
//! - Control flag messages and policy flags
//! - Connection lifecycle state machine
//! - Inbound message classification (frames vs. service messages)
//! - Background receive loop over any message source

pub mod connection;
pub mod control;
pub mod error;
pub mod message;
pub mod source;

pub use connection::*;
pub use control::*;
pub use error::*;
pub use message::*;
pub use source::*;
