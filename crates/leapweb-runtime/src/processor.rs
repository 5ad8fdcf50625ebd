//! Frame processor - consumes classified messages and keeps the latest frame

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use leapweb_core::Frame;
use leapweb_decode::build_frame;
use leapweb_transport::{
    CloseFrame, Connection, ConnectionState, ControlMessage, ControlSink, InboundMessage,
    MessageReceiver, PolicyFlag, PolicySet,
};

use crate::{PresentationSink, ProcessorConfig, RuntimeError, RuntimeResult};

/// Counters kept by the processor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessorStats {
    /// Every text message handled
    pub messages: u64,
    pub frames: u64,
    pub service_messages: u64,
    pub malformed: u64,
    pub decode_failures: u64,
    /// Sum of hands over all decoded frames
    pub hands_seen: u64,
    pub last_frame_id: Option<i64>,
}

/// Read-only view of the latest frame, shareable across threads
#[derive(Clone, Debug)]
pub struct FrameHandle {
    latest: Arc<RwLock<Option<Frame>>>,
}

impl FrameHandle {
    pub fn latest(&self) -> Option<Frame> {
        self.latest.read().clone()
    }

    pub fn latest_id(&self) -> Option<i64> {
        self.latest.read().as_ref().map(|f| f.id)
    }

    pub fn has_hand(&self) -> bool {
        self.latest.read().as_ref().is_some_and(Frame::has_hand)
    }
}

pub struct FrameProcessor<P: PresentationSink> {
    config: ProcessorConfig,
    policy: PolicySet,
    connection: Connection,
    latest: Arc<RwLock<Option<Frame>>>,
    has_hand: bool,
    stats: ProcessorStats,
    presenter: P,
}

impl<P: PresentationSink> FrameProcessor<P> {
    pub fn new(config: ProcessorConfig, presenter: P) -> Self {
        let policy = config.policy();
        let connection = Connection::new(config.endpoint.clone());
        Self {
            config,
            policy,
            connection,
            latest: Arc::new(RwLock::new(None)),
            has_hand: false,
            stats: ProcessorStats::default(),
            presenter,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn policy(&self) -> &PolicySet {
        &self.policy
    }

    pub fn state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn stats(&self) -> &ProcessorStats {
        &self.stats
    }

    pub fn has_hand(&self) -> bool {
        self.has_hand
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Clone of the most recent successfully decoded frame
    pub fn latest_frame(&self) -> Option<Frame> {
        self.latest.read().clone()
    }

    pub fn frame_handle(&self) -> FrameHandle {
        FrameHandle {
            latest: Arc::clone(&self.latest),
        }
    }

    fn is_live(&self) -> bool {
        matches!(
            self.connection.state(),
            ConnectionState::Connecting | ConnectionState::Connected
        )
    }

    /// Begin a connection and send the handshake flags.
    ///
    /// Does nothing while already connected. If the handshake cannot be
    /// sent the connection falls back to `Disconnected`.
    pub async fn start<C: ControlSink>(&mut self, sink: &mut C) -> RuntimeResult<()> {
        if self.connection.is_connected() {
            debug!("start ignored, already connected");
            return Ok(());
        }
        self.connection.begin_connect()?;

        for message in self.policy.handshake() {
            if let Err(e) = sink.send_control(message).await {
                warn!("handshake failed: {}", e);
                self.connection.connect_failed()?;
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// Close the connection. Returns the close frame to send, or `None`
    /// when nothing was open.
    pub fn stop(&mut self) -> RuntimeResult<Option<CloseFrame>> {
        if !self.is_live() {
            return Ok(None);
        }
        Ok(Some(self.connection.close()?))
    }

    /// Apply a policy; the change is sent right away if a connection is
    /// open, otherwise it goes out with the next handshake.
    pub async fn set_policy<C: ControlSink>(
        &mut self,
        flag: PolicyFlag,
        sink: &mut C,
    ) -> RuntimeResult<()> {
        let message = self.policy.set(flag);
        self.send_if_live(message, sink).await
    }

    pub async fn clear_policy<C: ControlSink>(
        &mut self,
        flag: PolicyFlag,
        sink: &mut C,
    ) -> RuntimeResult<()> {
        let message = self.policy.clear(flag);
        self.send_if_live(message, sink).await
    }

    async fn send_if_live<C: ControlSink>(
        &mut self,
        message: Option<ControlMessage>,
        sink: &mut C,
    ) -> RuntimeResult<()> {
        match message {
            Some(message) if self.is_live() => Ok(sink.send_control(message).await?),
            _ => Ok(()),
        }
    }

    /// Classify and handle one raw text message
    pub fn handle_text(&mut self, text: &str) -> RuntimeResult<()> {
        match InboundMessage::parse(text) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                self.stats.messages += 1;
                self.stats.malformed += 1;
                warn!("malformed message: {}", e);
                if self.config.drop_on_decode_error {
                    Ok(())
                } else {
                    Err(e.into())
                }
            }
        }
    }

    /// Handle one classified message.
    ///
    /// A frame that fails to decode leaves the previous frame in place.
    pub fn handle_message(&mut self, message: InboundMessage) -> RuntimeResult<()> {
        self.stats.messages += 1;
        match message {
            InboundMessage::Service(value) => {
                self.stats.service_messages += 1;
                trace!("service message: {}", value);
                Ok(())
            }
            InboundMessage::Frame(value) => match build_frame(&value) {
                Ok(frame) => {
                    self.accept(frame);
                    Ok(())
                }
                Err(e) => {
                    self.stats.decode_failures += 1;
                    warn!("dropping frame {}: {}", value["id"], e);
                    if self.config.drop_on_decode_error {
                        Ok(())
                    } else {
                        Err(RuntimeError::Decode(e))
                    }
                }
            },
        }
    }

    fn accept(&mut self, frame: Frame) {
        if self.connection.state() == ConnectionState::Connecting {
            if let Err(e) = self.connection.mark_connected() {
                warn!("frame {} did not complete the connection: {}", frame.id, e);
            }
        }

        self.stats.frames += 1;
        self.stats.hands_seen += frame.hands.len() as u64;
        self.stats.last_frame_id = Some(frame.id);

        let present = frame.has_hand();
        if present != self.has_hand {
            self.has_hand = present;
            self.presenter.on_hand_presence(present);
        }
        self.presenter.on_frame(&frame);

        *self.latest.write() = Some(frame);
    }

    /// Consume the receive channel until it closes
    pub async fn run(&mut self, receiver: &mut MessageReceiver) -> RuntimeResult<ProcessorStats> {
        while let Some(message) = receiver.recv().await {
            self.handle_message(message)?;
        }
        debug!("receive channel closed after {} messages", self.stats.messages);
        Ok(self.stats.clone())
    }
}
