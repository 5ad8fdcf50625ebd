#![no_main]

use libfuzzer_sys::fuzz_target;

use leapweb_decode::build_frame;
use leapweb_transport::InboundMessage;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(InboundMessage::Frame(value)) = InboundMessage::parse(text) {
        if let Ok(frame) = build_frame(&value) {
            assert!(frame.hands.len() <= 2);
            for hand in &frame.hands {
                for finger in &hand.fingers {
                    for bone in &finger.bones {
                        assert!(!(bone.length < 0.0));
                    }
                }
            }
        }
    }
});
