#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

use leapweb_core::DecodeError;
use leapweb_decode::build_frame;
use leapweb_test::{FrameFixture, HandFixture};

/// Well-formed frame, then one structural edit
#[derive(Debug, Arbitrary)]
struct Input {
    hands: u8,
    keep_pointables: u8,
    edit: Edit,
}

#[derive(Debug, Arbitrary)]
enum Edit {
    None,
    DropHandField(u8),
    DropPointableField(u8),
    ScaleVector(u8, f64),
    TruncateBases(u8),
}

fn edit_object(value: &mut Value, index: u8) -> Option<&mut serde_json::Map<String, Value>> {
    let items = value.as_array_mut()?;
    if items.is_empty() {
        return None;
    }
    let i = index as usize % items.len();
    items[i].as_object_mut()
}

fn nth_key(map: &serde_json::Map<String, Value>, index: u8) -> Option<String> {
    if map.is_empty() {
        return None;
    }
    map.keys().nth(index as usize % map.len()).cloned()
}

fuzz_target!(|input: Input| {
    let mut fixture = FrameFixture::new(1);
    for i in 0..(input.hands % 4) {
        let id = i as i64 + 1;
        fixture = fixture.with_hand(if i % 2 == 0 {
            HandFixture::left(id)
        } else {
            HandFixture::right(id)
        });
    }
    let mut value = fixture.to_value();

    if let Some(pointables) = value["pointables"].as_array_mut() {
        let keep = (input.keep_pointables as usize).min(pointables.len());
        if input.keep_pointables < 16 {
            pointables.truncate(keep);
        }
    }

    match input.edit {
        Edit::None => {}
        Edit::DropHandField(i) => {
            if let Some(hand) = edit_object(&mut value["hands"], i) {
                if let Some(key) = nth_key(hand, i) {
                    hand.remove(&key);
                }
            }
        }
        Edit::DropPointableField(i) => {
            if let Some(pointable) = edit_object(&mut value["pointables"], i) {
                if let Some(key) = nth_key(pointable, i) {
                    pointable.remove(&key);
                }
            }
        }
        Edit::ScaleVector(i, factor) => {
            if let Some(hand) = edit_object(&mut value["hands"], i) {
                if let Some(number) = serde_json::Number::from_f64(factor) {
                    hand.insert("palmPosition".into(), Value::Array(vec![
                        Value::Number(number.clone()),
                        Value::Number(number.clone()),
                        Value::Number(number),
                    ]));
                }
            }
        }
        Edit::TruncateBases(i) => {
            if let Some(pointable) = edit_object(&mut value["pointables"], i) {
                if let Some(bases) = pointable.get_mut("bases").and_then(Value::as_array_mut) {
                    bases.truncate(i as usize % 4);
                }
            }
        }
    }

    match build_frame(&value) {
        Ok(frame) => assert!(frame.hands.len() <= 2),
        Err(e) => {
            // Every failure names where it happened
            if let DecodeError::MissingField { path } = &e {
                assert!(!path.is_root());
            }
            let _ = e.to_string();
        }
    }
});
