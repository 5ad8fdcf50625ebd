//! Finger builder

use serde_json::Value;

use leapweb_core::{
    Basis, Bone, BoneType, DecodeError, DecodeResult, FieldPath, Finger, FingerType, ValueKind,
    Vector3, BONES_PER_FINGER,
};
use tracing::debug;

use crate::bone::build_bone;
use crate::record::{field, FieldSpec, Record};
use crate::vector::build_basis;

/// Fields every pointable record must carry
pub const POINTABLE_SCHEMA: &[FieldSpec] = &[
    field("btipPosition", ValueKind::Array),
    field("carpPosition", ValueKind::Array),
    field("dipPosition", ValueKind::Array),
    field("direction", ValueKind::Array),
    field("extended", ValueKind::Boolean),
    field("handId", ValueKind::Integer),
    field("id", ValueKind::Integer),
    field("length", ValueKind::Number),
    field("mcpPosition", ValueKind::Array),
    field("pipPosition", ValueKind::Array),
    field("stabilizedTipPosition", ValueKind::Array),
    field("timeVisible", ValueKind::Number),
    field("tipPosition", ValueKind::Array),
    field("tipVelocity", ValueKind::Array),
    field("tool", ValueKind::Boolean),
    field("touchDistance", ValueKind::Number),
    field("touchZone", ValueKind::String),
    field("type", ValueKind::Integer),
    field("width", ValueKind::Number),
    field("bases", ValueKind::Array),
];

/// Decode the four per-bone bases, all before any bone is built
fn bone_bases(record: &Record<'_>) -> DecodeResult<[Basis; BONES_PER_FINGER]> {
    let bases = record.list("bases")?;
    if bases.len() != BONES_PER_FINGER {
        return Err(DecodeError::ShapeMismatch {
            path: bases.path().clone(),
            expected: BONES_PER_FINGER,
            actual: bases.len(),
        });
    }

    let mut out = [[Vector3::ZERO; 3]; BONES_PER_FINGER];
    for (slot, (value, path)) in out.iter_mut().zip(bases.iter()) {
        *slot = build_basis(value, &path)?;
    }
    Ok(out)
}

/// Build a finger from one pointable record.
///
/// `finger_id` is the pointable's `handId` plus its type index, wrapping on
/// overflow. It is not unique across hands and should only be used for
/// display.
pub fn build_finger(
    hand_id: i64,
    frame_id: i64,
    pointable: &Value,
    path: FieldPath,
) -> DecodeResult<Finger> {
    let record = Record::open(pointable, path)?;
    record.validate(POINTABLE_SCHEMA)?;

    let bases = bone_bases(&record)?;

    let carp = record.vector3("carpPosition")?;
    let mcp = record.vector3("mcpPosition")?;
    let pip = record.vector3("pipPosition")?;
    let dip = record.vector3("dipPosition")?;
    let btip = record.vector3("btipPosition")?;
    let joints = [carp, mcp, pip, dip, btip];

    let type_index = record.integer("type")?;
    let pointable_hand = record.integer("handId")?;
    if pointable_hand != hand_id {
        debug!(
            "pointable {} reports hand {} but is attached to hand {}",
            record.path(),
            pointable_hand,
            hand_id
        );
    }
    let width = record.number("width")?;

    let bases_path = record.path().key("bases");
    let mut bones = Vec::with_capacity(BONES_PER_FINGER);
    for (i, bone_type) in BoneType::all().iter().enumerate() {
        bones.push(build_bone(
            &bases[i],
            joints[i],
            joints[i + 1],
            width,
            *bone_type,
            &bases_path.index(i),
        )?);
    }
    let bones: [Bone; BONES_PER_FINGER] = bones
        .try_into()
        .map_err(|b: Vec<_>| DecodeError::ShapeMismatch {
            path: bases_path.clone(),
            expected: BONES_PER_FINGER,
            actual: b.len(),
        })?;

    Ok(Finger {
        id: record.integer("id")?,
        frame_id,
        finger_id: pointable_hand.wrapping_add(type_index),
        time_visible: record.number("timeVisible")?,
        tip_position: record.vector3("tipPosition")?,
        tip_velocity: record.vector3("tipVelocity")?,
        direction: record.vector3("direction")?,
        stabilized_tip_position: record.vector3("stabilizedTipPosition")?,
        width,
        length: record.number("length")?,
        extended: record.boolean("extended")?,
        finger_type: FingerType::from_index(type_index),
        bones,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leapweb_core::Quaternion;
    use leapweb_test::{object_mut, PointableFixture};
    use serde_json::json;

    fn pointable_path(i: usize) -> FieldPath {
        FieldPath::root().key("pointables").index(i)
    }

    #[test]
    fn test_build_index_finger() {
        let value = PointableFixture::new(1, 1).to_value();
        let finger = build_finger(1, 42, &value, pointable_path(1)).unwrap();

        assert_eq!(finger.id, 11);
        assert_eq!(finger.frame_id, 42);
        assert_eq!(finger.finger_id, 2);
        assert_eq!(finger.finger_type, FingerType::Index);
        assert!(finger.extended);
        assert_eq!(finger.width, 16.5);
        assert_eq!(finger.length, 55.5);
        assert_eq!(finger.tip_velocity, Vector3::new(0.5, -0.5, 0.25));

        let lengths: Vec<f32> = finger.bones.iter().map(|b| b.length).collect();
        assert_eq!(lengths, vec![40.0, 30.0, 20.0, 15.0]);
        for (bone, bone_type) in finger.bones.iter().zip(BoneType::all()) {
            assert_eq!(bone.bone_type, *bone_type);
            assert_eq!(bone.orientation, Quaternion::identity());
        }
        // Bones chain joint to joint
        for pair in finger.bones.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(finger.bone(BoneType::Distal).end, Vector3::new(120.0, 150.0, -105.0));
    }

    #[test]
    fn test_thumb_metacarpal_zero_length() {
        let value = PointableFixture::new(1, 0).to_value();
        let finger = build_finger(1, 1, &value, pointable_path(0)).unwrap();
        assert_eq!(finger.finger_type, FingerType::Thumb);
        assert_eq!(finger.bone(BoneType::Metacarpal).length, 0.0);
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let value = PointableFixture::new(1, 1).with_type(9).to_value();
        let finger = build_finger(1, 1, &value, pointable_path(0)).unwrap();
        assert_eq!(finger.finger_type, FingerType::Unknown);
        assert_eq!(finger.finger_id, 10);
    }

    #[test]
    fn test_extreme_type_index_wraps_finger_id() {
        let value = PointableFixture::new(1, 1).with_type(i64::MAX).to_value();
        let finger = build_finger(1, 1, &value, pointable_path(0)).unwrap();
        assert_eq!(finger.finger_type, FingerType::Unknown);
        assert_eq!(finger.finger_id, i64::MIN);

        let value = PointableFixture::new(1, 1).with_type(i64::MIN).to_value();
        let finger = build_finger(1, 1, &value, pointable_path(0)).unwrap();
        assert_eq!(finger.finger_type, FingerType::Unknown);
        assert_eq!(finger.finger_id, i64::MIN + 1);
    }

    #[test]
    fn test_three_bases_is_shape_mismatch() {
        let mut value = PointableFixture::new(2, 3).to_value();
        object_mut(&mut value)["bases"]
            .as_array_mut()
            .unwrap()
            .pop();

        let err = build_finger(2, 1, &value, pointable_path(8)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ShapeMismatch {
                path: pointable_path(8).key("bases"),
                expected: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_bad_inner_basis_names_bone() {
        let mut value = PointableFixture::new(1, 2).to_value();
        object_mut(&mut value)["bases"][2] = json!([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

        let err = build_finger(1, 1, &value, pointable_path(2)).unwrap_err();
        assert_eq!(err.path().to_string(), "pointables[2].bases[2]");
    }

    #[test]
    fn test_missing_field() {
        let mut value = PointableFixture::new(1, 2).to_value();
        object_mut(&mut value).remove("touchZone");

        let err = build_finger(1, 1, &value, pointable_path(2)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                path: pointable_path(2).key("touchZone"),
            }
        );
    }

    #[test]
    fn test_type_mismatch() {
        let mut value = PointableFixture::new(1, 2).to_value();
        object_mut(&mut value).insert("extended".into(), json!("yes"));

        let err = build_finger(1, 1, &value, pointable_path(2)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                path: pointable_path(2).key("extended"),
                expected: ValueKind::Boolean,
            }
        );
    }
}
