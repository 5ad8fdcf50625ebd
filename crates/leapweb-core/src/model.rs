//! Skeletal tracking model
//!
//! Frame → Hand → (Arm, Finger → Bone). Every value here is produced by the
//! decoder in one pass and never mutated afterwards.

use serde::Serialize;

use crate::{Quaternion, Vector3};

/// Fingers per hand in the v6 frame schema
pub const FINGERS_PER_HAND: usize = 5;

/// Bones per finger
pub const BONES_PER_FINGER: usize = 4;

/// Maximum hands reported in one frame
pub const MAX_HANDS: usize = 2;

/// Arm length in millimetres.
///
/// The frame schema carries no arm length; this is a fixed approximation
/// of a typical adult forearm and is reported for every arm.
pub const ARM_LENGTH_APPROX: f32 = 245.0;

/// Anatomical finger type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FingerType {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
    Unknown,
}

impl FingerType {
    /// Map the schema's type index; anything outside 0..=4 is `Unknown`
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => FingerType::Thumb,
            1 => FingerType::Index,
            2 => FingerType::Middle,
            3 => FingerType::Ring,
            4 => FingerType::Pinky,
            _ => FingerType::Unknown,
        }
    }

    /// Schema index, `None` for `Unknown`
    pub fn index(self) -> Option<usize> {
        match self {
            FingerType::Thumb => Some(0),
            FingerType::Index => Some(1),
            FingerType::Middle => Some(2),
            FingerType::Ring => Some(3),
            FingerType::Pinky => Some(4),
            FingerType::Unknown => None,
        }
    }
}

/// Finger bone type, in anatomical order from the wrist outwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoneType {
    Metacarpal,
    Proximal,
    Intermediate,
    Distal,
}

impl BoneType {
    /// All bone types in order
    pub fn all() -> &'static [BoneType; BONES_PER_FINGER] {
        &[
            BoneType::Metacarpal,
            BoneType::Proximal,
            BoneType::Intermediate,
            BoneType::Distal,
        ]
    }
}

/// One rigid finger segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bone {
    /// Joint nearest the wrist
    pub start: Vector3,
    /// Joint nearest the tip
    pub end: Vector3,
    /// Midpoint of start and end
    pub center: Vector3,
    /// end − start, not normalized
    pub direction: Vector3,
    /// Distance from start to end
    pub length: f32,
    pub width: f32,
    pub bone_type: BoneType,
    /// Orientation built from the bone's local basis
    pub orientation: Quaternion,
}

/// Tracked finger with its four bones
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finger {
    pub id: i64,
    pub frame_id: i64,
    /// handId + type index. Not unique across hands; display only.
    pub finger_id: i64,
    pub time_visible: f32,
    pub tip_position: Vector3,
    pub tip_velocity: Vector3,
    pub direction: Vector3,
    pub stabilized_tip_position: Vector3,
    pub width: f32,
    pub length: f32,
    pub extended: bool,
    pub finger_type: FingerType,
    /// Metacarpal, proximal, intermediate, distal
    pub bones: [Bone; BONES_PER_FINGER],
}

impl Finger {
    pub fn bone(&self, bone_type: BoneType) -> &Bone {
        &self.bones[bone_type as usize]
    }
}

/// Forearm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arm {
    pub elbow: Vector3,
    pub wrist: Vector3,
    /// Midpoint of elbow and wrist
    pub center: Vector3,
    pub direction: Vector3,
    /// Always [`ARM_LENGTH_APPROX`]
    pub length: f32,
    pub width: f32,
    pub basis: Quaternion,
}

/// Tracked hand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hand {
    pub frame_id: i64,
    pub id: i64,
    pub confidence: f32,
    pub grab_strength: f32,
    /// Not present in the frame schema, always 0
    pub grab_angle: f32,
    pub pinch_strength: f32,
    /// Not present in the frame schema, always 0
    pub pinch_distance: f32,
    /// Read from the schema's `s` field
    pub palm_width: f32,
    pub is_left: bool,
    pub time_visible: f32,
    pub arm: Arm,
    pub fingers: [Finger; FINGERS_PER_HAND],
    pub palm_position: Vector3,
    pub stabilized_palm_position: Vector3,
    pub palm_velocity: Vector3,
    pub palm_normal: Vector3,
    pub direction: Vector3,
    pub wrist_position: Vector3,
}

impl Hand {
    pub fn is_right(&self) -> bool {
        !self.is_left
    }

    /// First finger of the given type
    pub fn finger(&self, finger_type: FingerType) -> Option<&Finger> {
        self.fingers.iter().find(|f| f.finger_type == finger_type)
    }
}

/// Tracking volume
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InteractionBox {
    pub center: Vector3,
    pub size: Vector3,
}

impl InteractionBox {
    pub fn new(center: Vector3, size: Vector3) -> Self {
        Self { center, size }
    }

    /// Is the point inside the box (inclusive)?
    pub fn contains(&self, point: &Vector3) -> bool {
        let half = self.size * 0.5;
        let d = *point - self.center;
        d.x.abs() <= half.x && d.y.abs() <= half.y && d.z.abs() <= half.z
    }
}

/// One complete tracking snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub id: i64,
    pub timestamp: i64,
    pub frames_per_second: f32,
    pub interaction_box: InteractionBox,
    /// 0, 1 or 2 hands
    pub hands: Vec<Hand>,
}

impl Frame {
    /// Is at least one hand tracked in this frame?
    pub fn has_hand(&self) -> bool {
        !self.hands.is_empty()
    }

    pub fn hand(&self, id: i64) -> Option<&Hand> {
        self.hands.iter().find(|h| h.id == id)
    }

    pub fn left_hand(&self) -> Option<&Hand> {
        self.hands.iter().find(|h| h.is_left)
    }

    pub fn right_hand(&self) -> Option<&Hand> {
        self.hands.iter().find(|h| h.is_right())
    }
}
