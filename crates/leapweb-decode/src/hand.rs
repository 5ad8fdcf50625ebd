//! Hand builder

use serde_json::Value;

use leapweb_core::{
    Arm, DecodeError, DecodeResult, FieldPath, Finger, Hand, ValueKind, ARM_LENGTH_APPROX,
    FINGERS_PER_HAND,
};

use crate::finger::build_finger;
use crate::record::{field, FieldSpec, Record, RecordList};
use crate::vector::build_orientation;

/// Fields every hand record must carry
pub const HAND_SCHEMA: &[FieldSpec] = &[
    field("armBasis", ValueKind::Array),
    field("armWidth", ValueKind::Number),
    field("confidence", ValueKind::Number),
    field("direction", ValueKind::Array),
    field("elbow", ValueKind::Array),
    field("grabStrength", ValueKind::Number),
    field("id", ValueKind::Integer),
    field("palmNormal", ValueKind::Array),
    field("palmPosition", ValueKind::Array),
    field("palmVelocity", ValueKind::Array),
    field("pinchStrength", ValueKind::Number),
    field("s", ValueKind::Number),
    field("stabilizedPalmPosition", ValueKind::Array),
    field("timeVisible", ValueKind::Number),
    field("type", ValueKind::String),
    field("wrist", ValueKind::Array),
];

/// Build a hand from its record and its five pointables, in order.
///
/// Handedness is `type == "left"`; any other string is treated as right.
pub fn build_hand(
    frame_id: i64,
    hand: &Value,
    path: FieldPath,
    pointables: &RecordList<'_>,
) -> DecodeResult<Hand> {
    let record = Record::open(hand, path)?;
    record.validate(HAND_SCHEMA)?;

    if pointables.len() != FINGERS_PER_HAND {
        return Err(DecodeError::ShapeMismatch {
            path: pointables.path().clone(),
            expected: FINGERS_PER_HAND,
            actual: pointables.len(),
        });
    }

    let id = record.integer("id")?;
    let arm_basis = record.basis("armBasis")?;
    let direction = record.vector3("direction")?;
    let elbow = record.vector3("elbow")?;
    let wrist = record.vector3("wrist")?;

    let arm = Arm {
        elbow,
        wrist,
        center: elbow.midpoint(&wrist),
        direction,
        length: ARM_LENGTH_APPROX,
        width: record.number("armWidth")?,
        basis: build_orientation(&arm_basis, &record.path().key("armBasis"))?,
    };

    let fingers = pointables
        .iter()
        .map(|(value, path)| build_finger(id, frame_id, value, path))
        .collect::<DecodeResult<Vec<Finger>>>()?;
    let fingers: [Finger; FINGERS_PER_HAND] =
        fingers
            .try_into()
            .map_err(|f: Vec<Finger>| DecodeError::ShapeMismatch {
                path: pointables.path().clone(),
                expected: FINGERS_PER_HAND,
                actual: f.len(),
            })?;

    Ok(Hand {
        frame_id,
        id,
        confidence: record.number("confidence")?,
        grab_strength: record.number("grabStrength")?,
        grab_angle: 0.0,
        pinch_strength: record.number("pinchStrength")?,
        pinch_distance: 0.0,
        palm_width: record.number("s")?,
        is_left: record.string("type")? == "left",
        time_visible: record.number("timeVisible")?,
        arm,
        fingers,
        palm_position: record.vector3("palmPosition")?,
        stabilized_palm_position: record.vector3("stabilizedPalmPosition")?,
        palm_velocity: record.vector3("palmVelocity")?,
        palm_normal: record.vector3("palmNormal")?,
        direction,
        wrist_position: wrist,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leapweb_core::{FingerType, Quaternion, Vector3};
    use leapweb_test::{object_mut, HandFixture};

    fn pointable_values(hand: &HandFixture) -> Vec<Value> {
        hand.pointables().iter().map(|p| p.to_value()).collect()
    }

    fn decode(hand: &HandFixture) -> DecodeResult<Hand> {
        let pointables = pointable_values(hand);
        let list = RecordList::new(&pointables, FieldPath::root().key("pointables"));
        build_hand(9, &hand.to_value(), FieldPath::root().key("hands").index(0), &list)
    }

    #[test]
    fn test_build_left_hand() {
        let hand = decode(&HandFixture::left(1)).unwrap();

        assert!(hand.is_left);
        assert_eq!(hand.id, 1);
        assert_eq!(hand.frame_id, 9);
        assert_eq!(hand.confidence, 0.75);
        assert_eq!(hand.grab_strength, 0.25);
        assert_eq!(hand.pinch_strength, 0.5);
        assert_eq!(hand.grab_angle, 0.0);
        assert_eq!(hand.pinch_distance, 0.0);
        assert_eq!(hand.palm_width, 85.5);
        assert_eq!(hand.time_visible, 3.5);
        assert_eq!(hand.palm_position, Vector3::new(100.0, 200.0, 10.0));
        assert_eq!(hand.wrist_position, Vector3::new(100.0, 190.0, 40.0));

        let types: Vec<FingerType> = hand.fingers.iter().map(|f| f.finger_type).collect();
        assert_eq!(
            types,
            vec![
                FingerType::Thumb,
                FingerType::Index,
                FingerType::Middle,
                FingerType::Ring,
                FingerType::Pinky
            ]
        );
        assert!(hand.fingers.iter().all(|f| f.frame_id == 9));
    }

    #[test]
    fn test_arm() {
        let hand = decode(&HandFixture::left(1)).unwrap();
        let arm = &hand.arm;

        assert_eq!(arm.elbow, Vector3::new(100.0, 150.0, 260.0));
        assert_eq!(arm.wrist, Vector3::new(100.0, 190.0, 40.0));
        assert_eq!(arm.center, Vector3::new(100.0, 170.0, 150.0));
        assert_eq!(arm.length, ARM_LENGTH_APPROX);
        assert_eq!(arm.width, 58.5);
        assert_eq!(arm.direction, hand.direction);
        assert_eq!(arm.basis, Quaternion::identity());
    }

    #[test]
    fn test_handedness_is_permissive() {
        assert!(!decode(&HandFixture::right(2)).unwrap().is_left);
        assert!(!decode(&HandFixture::new(2, "unknown")).unwrap().is_left);
        assert!(!decode(&HandFixture::new(2, "LEFT")).unwrap().is_left);
    }

    #[test]
    fn test_missing_palm_position() {
        let fixture = HandFixture::left(1);
        let mut value = fixture.to_value();
        object_mut(&mut value).remove("palmPosition");
        let pointables = pointable_values(&fixture);
        let list = RecordList::new(&pointables, FieldPath::root().key("pointables"));

        let err = build_hand(9, &value, FieldPath::root().key("hands").index(0), &list).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                path: FieldPath::root().key("hands").index(0).key("palmPosition"),
            }
        );
    }

    #[test]
    fn test_arm_basis_needs_three_vectors() {
        let fixture = HandFixture::left(1);
        let mut value = fixture.to_value();
        object_mut(&mut value)["armBasis"].as_array_mut().unwrap().pop();
        let pointables = pointable_values(&fixture);
        let list = RecordList::new(&pointables, FieldPath::root().key("pointables"));

        let err = build_hand(9, &value, FieldPath::root().key("hands").index(0), &list).unwrap_err();
        assert!(matches!(err, DecodeError::ShapeMismatch { expected: 3, actual: 2, .. }));
        assert_eq!(err.path().to_string(), "hands[0].armBasis");
    }

    #[test]
    fn test_requires_five_pointables() {
        let fixture = HandFixture::left(1);
        let mut pointables = pointable_values(&fixture);
        pointables.pop();
        let list = RecordList::new(&pointables, FieldPath::root().key("pointables"));

        let err = build_hand(9, &fixture.to_value(), FieldPath::root().key("hands").index(0), &list)
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::ShapeMismatch {
                path: FieldPath::root().key("pointables"),
                expected: 5,
                actual: 4,
            }
        );
    }
}
