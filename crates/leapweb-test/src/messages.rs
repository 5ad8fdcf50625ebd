//! Raw text message streams as the tracking service sends them

use crate::FrameFixture;

/// First message after connecting: service version handshake
pub const SERVICE_HANDSHAKE: &str = r#"{"serviceVersion":"3.1.3+45004","version":6}"#;

/// Device attach event, carries no frame id
pub const DEVICE_EVENT: &str =
    r#"{"event":{"state":{"attached":true,"id":"LP00000000001","streaming":true,"type":"Peripheral"},"type":"deviceEvent"}}"#;

/// Handshake, a device event, then `count` frames cycling 0, 1 and 2 hands
pub fn session_messages(count: usize) -> Vec<String> {
    let mut messages = vec![SERVICE_HANDSHAKE.to_string(), DEVICE_EVENT.to_string()];
    for i in 0..count {
        let id = i as i64 + 1;
        let frame = match i % 3 {
            0 => FrameFixture::empty(id),
            1 => FrameFixture::one_hand(id),
            _ => FrameFixture::two_hands(id),
        };
        messages.push(frame.to_json());
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_messages() {
        let messages = session_messages(4);
        assert_eq!(messages.len(), 6);
        assert!(messages[0].contains("serviceVersion"));
        assert!(messages[2].contains("\"id\":1"));
    }
}
