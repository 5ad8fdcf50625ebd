//! Inbound message classification

use serde_json::Value;

use crate::{TransportError, TransportResult};

/// One text message received from the service
#[derive(Clone, Debug, PartialEq)]
pub enum InboundMessage {
    /// Tracking frame (carries a top-level `id`)
    Frame(Value),
    /// Anything else: protocol version handshake, device events
    Service(Value),
}

impl InboundMessage {
    /// Parse and classify a text message
    pub fn parse(text: &str) -> TransportResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        match value.as_object() {
            Some(map) if map.contains_key("id") => Ok(InboundMessage::Frame(value)),
            Some(_) => Ok(InboundMessage::Service(value)),
            None => Err(TransportError::NotAnObject),
        }
    }

    pub fn is_frame(&self) -> bool {
        matches!(self, InboundMessage::Frame(_))
    }

    pub fn value(&self) -> &Value {
        match self {
            InboundMessage::Frame(v) | InboundMessage::Service(v) => v,
        }
    }
}
