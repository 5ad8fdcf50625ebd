//! Presentation hooks
//!
//! Whatever consumes decoded frames (a renderer, a recorder, a logger)
//! implements [`PresentationSink`].

use leapweb_core::{FingerType, Frame, Hand};
use tracing::{debug, info};

pub trait PresentationSink: Send {
    /// Every successfully decoded frame
    fn on_frame(&mut self, frame: &Frame);

    /// Called only when hand presence flips
    fn on_hand_presence(&mut self, present: bool);
}

/// Sink that only logs, remembering which hand ids it has seen
#[derive(Debug, Default)]
pub struct LoggingSink {
    tracked: Vec<i64>,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand ids present in the last frame
    pub fn tracked(&self) -> &[i64] {
        &self.tracked
    }

    fn log_hand(frame: &Frame, hand: &Hand) {
        let pointing = hand.finger(FingerType::Index).map(|f| f.tip_position);
        debug!(
            "frame {} hand {} ({}) palm {:?}{} index tip {:?} grab {:.2} pinch {:.2}",
            frame.id,
            hand.id,
            if hand.is_left { "left" } else { "right" },
            hand.palm_position,
            if frame.interaction_box.contains(&hand.palm_position) {
                ""
            } else {
                " outside box"
            },
            pointing,
            hand.grab_strength,
            hand.pinch_strength
        );
    }
}

impl PresentationSink for LoggingSink {
    fn on_frame(&mut self, frame: &Frame) {
        for id in &self.tracked {
            if frame.hand(*id).is_none() {
                info!("hand {} lost at frame {}", id, frame.id);
            }
        }
        for hand in &frame.hands {
            if !self.tracked.contains(&hand.id) {
                info!("hand {} found at frame {}", hand.id, frame.id);
            }
            Self::log_hand(frame, hand);
        }
        self.tracked = frame.hands.iter().map(|h| h.id).collect();
    }

    fn on_hand_presence(&mut self, present: bool) {
        if present {
            info!("hand tracking active");
        } else {
            info!("no hands in view");
        }
    }
}
