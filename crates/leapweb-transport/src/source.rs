//! Message sources, control sinks and the background receive loop
//!
//! The websocket itself is kept behind [`MessageSource`] and
//! [`ControlSink`] so any text stream can drive the pipeline: a live
//! socket adapter, a replay file or a test channel.

use std::collections::VecDeque;
use std::future::Future;

use tokio::sync::mpsc;
use tracing::{trace, warn};

use crate::{ControlMessage, InboundMessage, TransportError, TransportResult};

/// Channel of classified inbound messages
pub type MessageReceiver = mpsc::Receiver<InboundMessage>;

/// Anything that yields text messages until the stream ends
pub trait MessageSource: Send + 'static {
    /// Next message, or `None` once the stream is closed
    fn next_message(&mut self) -> impl Future<Output = Option<String>> + Send;
}

impl MessageSource for mpsc::Receiver<String> {
    fn next_message(&mut self) -> impl Future<Output = Option<String>> + Send {
        self.recv()
    }
}

/// Fixed, in-memory message sequence
#[derive(Debug, Default)]
pub struct ReplaySource {
    messages: VecDeque<String>,
}

impl ReplaySource {
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }
}

impl MessageSource for ReplaySource {
    fn next_message(&mut self) -> impl Future<Output = Option<String>> + Send {
        std::future::ready(self.messages.pop_front())
    }
}

/// Outbound side: where control messages go
pub trait ControlSink: Send {
    fn send_control(
        &mut self,
        message: ControlMessage,
    ) -> impl Future<Output = TransportResult<()>> + Send;
}

impl ControlSink for mpsc::Sender<String> {
    fn send_control(
        &mut self,
        message: ControlMessage,
    ) -> impl Future<Output = TransportResult<()>> + Send {
        let payload = message.to_json();
        async move {
            self.send(payload)
                .await
                .map_err(|_| TransportError::ChannelClosed)
        }
    }
}

/// Records every payload; used where no service is listening
impl ControlSink for Vec<String> {
    fn send_control(
        &mut self,
        message: ControlMessage,
    ) -> impl Future<Output = TransportResult<()>> + Send {
        self.push(message.to_json());
        std::future::ready(Ok(()))
    }
}

/// Spawn a task that reads `source`, classifies each message and
/// forwards it over a bounded channel of `capacity`.
///
/// Malformed messages are logged and skipped. The task ends when the
/// source is exhausted or the receiver is dropped.
pub fn spawn_receive_loop<S: MessageSource>(mut source: S, capacity: usize) -> MessageReceiver {
    let (tx, rx) = mpsc::channel(capacity.max(1));

    tokio::spawn(async move {
        while let Some(text) = source.next_message().await {
            match InboundMessage::parse(&text) {
                Ok(message) => {
                    if tx.send(message).await.is_err() {
                        break; // Receiver dropped
                    }
                }
                Err(e) => {
                    warn!("dropping malformed message: {}", e);
                }
            }
        }
        trace!("receive loop finished");
    });

    rx
}
