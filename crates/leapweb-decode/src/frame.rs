//! Frame builder - top of the decode chain

use serde_json::Value;

use leapweb_core::{
    DecodeError, DecodeResult, FieldPath, Frame, InteractionBox, ValueKind, FINGERS_PER_HAND,
    MAX_HANDS,
};
use tracing::{debug, trace};

use crate::hand::build_hand;
use crate::record::{field, FieldSpec, Record, RecordList};

/// Top-level fields of a frame message
pub const FRAME_SCHEMA: &[FieldSpec] = &[
    field("id", ValueKind::Integer),
    field("timestamp", ValueKind::Integer),
    field("currentFrameRate", ValueKind::Number),
    field("interactionBox", ValueKind::Object),
    field("hands", ValueKind::Array),
    field("pointables", ValueKind::Array),
];

const INTERACTION_BOX_SCHEMA: &[FieldSpec] = &[
    field("center", ValueKind::Array),
    field("size", ValueKind::Array),
];

fn build_interaction_box(record: &Record<'_>) -> DecodeResult<InteractionBox> {
    let ibox = record.object("interactionBox")?;
    ibox.validate(INTERACTION_BOX_SCHEMA)?;
    Ok(InteractionBox::new(ibox.vector3("center")?, ibox.vector3("size")?))
}

/// Decode one complete frame record.
///
/// One hand consumes all five pointables; two hands take pointables
/// `[0, 5)` and `[5, 10)` in order. Any other hand count is not an error:
/// the frame is returned with no hands and hand data is not inspected.
/// Below that dispatch, any failure aborts the whole frame.
pub fn build_frame(record: &Value) -> DecodeResult<Frame> {
    let record = Record::open(record, FieldPath::root())?;
    record.validate(FRAME_SCHEMA)?;

    let id = record.integer("id")?;
    let timestamp = record.integer("timestamp")?;
    let frames_per_second = record.number("currentFrameRate")?;
    let interaction_box = build_interaction_box(&record)?;

    let hand_records = record.list("hands")?;
    let pointables = record.list("pointables")?;

    let hands = match hand_records.len() {
        1 => {
            let (hand, path) = first(&hand_records)?;
            vec![build_hand(id, hand, path, &pointables)?]
        }
        MAX_HANDS => {
            let expected = MAX_HANDS * FINGERS_PER_HAND;
            if pointables.len() != expected {
                return Err(DecodeError::ShapeMismatch {
                    path: pointables.path().clone(),
                    expected,
                    actual: pointables.len(),
                });
            }
            let mut hands = Vec::with_capacity(MAX_HANDS);
            for (i, (hand, path)) in hand_records.iter().enumerate() {
                let start = i * FINGERS_PER_HAND;
                let slice = pointables.slice(start..start + FINGERS_PER_HAND)?;
                hands.push(build_hand(id, hand, path, &slice)?);
            }
            hands
        }
        n => {
            trace!("frame {} reports {} hands, treating as no hand", id, n);
            Vec::new()
        }
    };

    debug!("decoded frame {} with {} hand(s)", id, hands.len());

    Ok(Frame {
        id,
        timestamp,
        frames_per_second,
        interaction_box,
        hands,
    })
}

fn first<'a>(list: &RecordList<'a>) -> DecodeResult<(&'a Value, FieldPath)> {
    list.iter().next().ok_or_else(|| DecodeError::ShapeMismatch {
        path: list.path().clone(),
        expected: 1,
        actual: 0,
    })
}
