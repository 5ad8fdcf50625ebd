//! Control messages sent to the tracking service
//!
//! The service accepts small JSON objects carrying one boolean each.
//! Policy flags are the caller-facing vocabulary; [`PolicySet`] maps them
//! onto the flags the service understands.

use serde_json::{Map, Value};
use tracing::info;

/// Default service endpoint (v6 JSON protocol)
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:6437/v6.json";

/// Port the tracking service listens on
pub const SERVICE_PORT: u16 = 6437;

/// Endpoint for a service running on `host`
pub fn endpoint_for_host(host: &str) -> String {
    format!("ws://{}:{}/v6.json", host, SERVICE_PORT)
}

/// One outbound control message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMessage {
    /// Application focus
    Focus(bool),
    /// Keep streaming frames while unfocused
    Background(bool),
    /// Gesture recognition
    Gestures(bool),
    /// Head-mounted tracking optimization
    OptimizeHmd(bool),
}

impl ControlMessage {
    /// Wire key for this message
    pub fn key(&self) -> &'static str {
        match self {
            ControlMessage::Focus(_) => "focused",
            ControlMessage::Background(_) => "background",
            ControlMessage::Gestures(_) => "enableGestures",
            ControlMessage::OptimizeHmd(_) => "optimizeHMD",
        }
    }

    pub fn enabled(&self) -> bool {
        match *self {
            ControlMessage::Focus(on)
            | ControlMessage::Background(on)
            | ControlMessage::Gestures(on)
            | ControlMessage::OptimizeHmd(on) => on,
        }
    }

    /// Serialized payload, e.g. `{"background":true}`
    pub fn to_json(&self) -> String {
        let mut payload = Map::new();
        payload.insert(self.key().to_string(), Value::Bool(self.enabled()));
        Value::Object(payload).to_string()
    }
}

/// Caller-facing policy vocabulary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolicyFlag {
    Default,
    BackgroundFrames,
    OptimizeHmd,
    AllowPauseResume,
}

/// Current service flags
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicySet {
    pub background: bool,
    pub gestures: bool,
    pub optimize_hmd: bool,
    pub focus_on_connect: bool,
}

impl Default for PolicySet {
    fn default() -> Self {
        Self {
            background: true,
            gestures: false,
            optimize_hmd: false,
            focus_on_connect: true,
        }
    }
}

impl PolicySet {
    /// Apply a policy. Returns the control message to send, if any.
    ///
    /// `Default` turns background frames off. `AllowPauseResume` has no
    /// service-side counterpart and is only logged.
    pub fn set(&mut self, flag: PolicyFlag) -> Option<ControlMessage> {
        info!("policy set: {:?}", flag);
        match flag {
            PolicyFlag::Default => {
                self.background = false;
                Some(ControlMessage::Background(false))
            }
            PolicyFlag::BackgroundFrames => {
                self.background = true;
                Some(ControlMessage::Background(true))
            }
            PolicyFlag::OptimizeHmd => {
                self.optimize_hmd = true;
                Some(ControlMessage::OptimizeHmd(true))
            }
            PolicyFlag::AllowPauseResume => None,
        }
    }

    /// Withdraw a policy. Returns the control message to send, if any.
    pub fn clear(&mut self, flag: PolicyFlag) -> Option<ControlMessage> {
        info!("policy cleared: {:?}", flag);
        match flag {
            PolicyFlag::Default | PolicyFlag::BackgroundFrames => {
                self.background = false;
                Some(ControlMessage::Background(false))
            }
            PolicyFlag::OptimizeHmd => {
                self.optimize_hmd = false;
                Some(ControlMessage::OptimizeHmd(false))
            }
            PolicyFlag::AllowPauseResume => None,
        }
    }

    /// Messages sent right after the connection opens, in order:
    /// background, gestures and HMD when enabled, then focus.
    pub fn handshake(&self) -> Vec<ControlMessage> {
        let mut messages = vec![ControlMessage::Background(self.background)];
        if self.gestures {
            messages.push(ControlMessage::Gestures(true));
        }
        if self.optimize_hmd {
            messages.push(ControlMessage::OptimizeHmd(true));
        }
        if self.focus_on_connect {
            messages.push(ControlMessage::Focus(true));
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payloads() {
        let cases = [
            (ControlMessage::Focus(true), r#"{"focused":true}"#),
            (ControlMessage::Background(false), r#"{"background":false}"#),
            (ControlMessage::Gestures(true), r#"{"enableGestures":true}"#),
            (ControlMessage::OptimizeHmd(false), r#"{"optimizeHMD":false}"#),
        ];
        for (message, expected) in cases {
            let got: Value = serde_json::from_str(&message.to_json()).unwrap();
            let want: Value = serde_json::from_str(expected).unwrap();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(endpoint_for_host("localhost"), DEFAULT_ENDPOINT);
        assert_eq!(endpoint_for_host("10.0.0.2"), "ws://10.0.0.2:6437/v6.json");
    }

    #[test]
    fn test_set_policies() {
        let mut policy = PolicySet::default();
        assert!(policy.background);

        assert_eq!(policy.set(PolicyFlag::Default), Some(ControlMessage::Background(false)));
        assert!(!policy.background);

        assert_eq!(
            policy.set(PolicyFlag::BackgroundFrames),
            Some(ControlMessage::Background(true))
        );
        assert!(policy.background);

        assert_eq!(policy.set(PolicyFlag::OptimizeHmd), Some(ControlMessage::OptimizeHmd(true)));
        assert!(policy.optimize_hmd);

        let before = policy.clone();
        assert_eq!(policy.set(PolicyFlag::AllowPauseResume), None);
        assert_eq!(policy, before);
    }

    #[test]
    fn test_clear_policies() {
        let mut policy = PolicySet::default();
        policy.set(PolicyFlag::OptimizeHmd);

        assert_eq!(
            policy.clear(PolicyFlag::BackgroundFrames),
            Some(ControlMessage::Background(false))
        );
        assert_eq!(policy.clear(PolicyFlag::OptimizeHmd), Some(ControlMessage::OptimizeHmd(false)));
        assert!(!policy.optimize_hmd);
        assert_eq!(policy.clear(PolicyFlag::AllowPauseResume), None);
    }

    #[test]
    fn test_handshake_order() {
        let policy = PolicySet::default();
        assert_eq!(
            policy.handshake(),
            vec![ControlMessage::Background(true), ControlMessage::Focus(true)]
        );

        let mut policy = PolicySet {
            gestures: true,
            focus_on_connect: false,
            ..PolicySet::default()
        };
        policy.set(PolicyFlag::OptimizeHmd);
        assert_eq!(
            policy.handshake(),
            vec![
                ControlMessage::Background(true),
                ControlMessage::Gestures(true),
                ControlMessage::OptimizeHmd(true),
            ]
        );
    }
}
