//! Builders for v6 frame documents
//!
//! Geometry is deterministic: each finger lies along -Z at an x offset
//! derived from its hand and type, with bone lengths 40/30/20/15 mm
//! (the thumb metacarpal is zero length, as the tracking service reports).

use serde_json::{json, Map, Value};

/// Identity basis: x, y, z axes
pub const IDENTITY_BASIS: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Lengths of metacarpal, proximal, intermediate, distal bones (non-thumb)
pub const BONE_LENGTHS: [f64; 4] = [40.0, 30.0, 20.0, 15.0];

/// Finger pointable record builder
#[derive(Clone, Debug)]
pub struct PointableFixture {
    pub id: i64,
    pub hand_id: i64,
    pub type_index: i64,
    pub origin: [f64; 3],
    pub bases: Vec<[[f64; 3]; 3]>,
    pub extended: bool,
}

impl PointableFixture {
    pub fn new(hand_id: i64, type_index: i64) -> Self {
        PointableFixture {
            id: hand_id * 10 + type_index,
            hand_id,
            type_index,
            origin: [hand_id as f64 * 100.0 + type_index as f64 * 20.0, 150.0, 0.0],
            bases: vec![IDENTITY_BASIS; 4],
            extended: true,
        }
    }

    pub fn with_origin(mut self, origin: [f64; 3]) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_bases(mut self, bases: Vec<[[f64; 3]; 3]>) -> Self {
        self.bases = bases;
        self
    }

    pub fn with_type(mut self, type_index: i64) -> Self {
        self.type_index = type_index;
        self
    }

    /// carp, mcp, pip, dip, btip joint positions
    pub fn joints(&self) -> [[f64; 3]; 5] {
        let [x, y, z] = self.origin;
        let mut lengths = BONE_LENGTHS;
        if self.type_index == 0 {
            lengths[0] = 0.0;
        }
        let mut joints = [[x, y, z]; 5];
        let mut depth = z;
        for (i, len) in lengths.iter().enumerate() {
            depth -= len;
            joints[i + 1] = [x, y, depth];
        }
        joints
    }

    pub fn to_value(&self) -> Value {
        let [carp, mcp, pip, dip, btip] = self.joints();
        let tip = [btip[0], btip[1], btip[2] - 2.0];
        json!({
            "bases": self.bases,
            "btipPosition": btip,
            "carpPosition": carp,
            "dipPosition": dip,
            "direction": [0.0, 0.0, -1.0],
            "extended": self.extended,
            "handId": self.hand_id,
            "id": self.id,
            "length": 55.5,
            "mcpPosition": mcp,
            "pipPosition": pip,
            "stabilizedTipPosition": tip,
            "timeVisible": 1.25,
            "tipPosition": tip,
            "tipVelocity": [0.5, -0.5, 0.25],
            "tool": false,
            "touchDistance": 0.5,
            "touchZone": "hovering",
            "type": self.type_index,
            "width": 16.5
        })
    }
}

/// Hand record builder
#[derive(Clone, Debug)]
pub struct HandFixture {
    pub id: i64,
    pub side: String,
    pub palm_position: [f64; 3],
    pub arm_basis: [[f64; 3]; 3],
}

impl HandFixture {
    pub fn left(id: i64) -> Self {
        Self::new(id, "left")
    }

    pub fn right(id: i64) -> Self {
        Self::new(id, "right")
    }

    pub fn new(id: i64, side: &str) -> Self {
        HandFixture {
            id,
            side: side.to_string(),
            palm_position: [id as f64 * 100.0, 200.0, 10.0],
            arm_basis: IDENTITY_BASIS,
        }
    }

    pub fn with_palm_position(mut self, palm_position: [f64; 3]) -> Self {
        self.palm_position = palm_position;
        self
    }

    /// The five pointables belonging to this hand, thumb first
    pub fn pointables(&self) -> Vec<PointableFixture> {
        (0..5).map(|t| PointableFixture::new(self.id, t)).collect()
    }

    pub fn to_value(&self) -> Value {
        let [px, py, pz] = self.palm_position;
        json!({
            "armBasis": self.arm_basis,
            "armWidth": 58.5,
            "confidence": 0.75,
            "direction": [0.0, 0.0, -1.0],
            "elbow": [px, py - 50.0, pz + 250.0],
            "grabStrength": 0.25,
            "id": self.id,
            "palmNormal": [0.0, -1.0, 0.0],
            "palmPosition": [px, py, pz],
            "palmVelocity": [1.5, 0.0, -2.5],
            "pinchStrength": 0.5,
            "r": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            "s": 85.5,
            "sphereCenter": [px, py + 30.0, pz],
            "sphereRadius": 70.5,
            "stabilizedPalmPosition": [px, py, pz + 0.5],
            "t": [0.0, 0.0, 0.0],
            "timeVisible": 3.5,
            "type": self.side,
            "wrist": [px, py - 10.0, pz + 30.0]
        })
    }
}

/// Frame record builder
#[derive(Clone, Debug)]
pub struct FrameFixture {
    pub id: i64,
    pub timestamp: i64,
    pub frame_rate: f64,
    pub hands: Vec<HandFixture>,
    /// Overrides the pointables derived from `hands`
    pub pointables: Option<Vec<Value>>,
}

impl FrameFixture {
    pub fn new(id: i64) -> Self {
        FrameFixture {
            id,
            timestamp: 1_000_000 + id * 9_000,
            frame_rate: 110.5,
            hands: Vec::new(),
            pointables: None,
        }
    }

    /// Frame with no tracked hand
    pub fn empty(id: i64) -> Self {
        Self::new(id)
    }

    pub fn one_hand(id: i64) -> Self {
        Self::new(id).with_hand(HandFixture::left(1))
    }

    pub fn two_hands(id: i64) -> Self {
        Self::new(id)
            .with_hand(HandFixture::left(1))
            .with_hand(HandFixture::right(2))
    }

    pub fn with_hand(mut self, hand: HandFixture) -> Self {
        self.hands.push(hand);
        self
    }

    pub fn with_pointables(mut self, pointables: Vec<Value>) -> Self {
        self.pointables = Some(pointables);
        self
    }

    pub fn to_value(&self) -> Value {
        let pointables = match &self.pointables {
            Some(p) => p.clone(),
            None => self
                .hands
                .iter()
                .flat_map(|h| h.pointables())
                .map(|p| p.to_value())
                .collect(),
        };
        json!({
            "currentFrameRate": self.frame_rate,
            "devices": [],
            "gestures": [],
            "hands": self.hands.iter().map(HandFixture::to_value).collect::<Vec<_>>(),
            "id": self.id,
            "interactionBox": {
                "center": [0.0, 200.0, 0.0],
                "size": [235.5, 235.5, 147.5]
            },
            "pointables": pointables,
            "r": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            "s": 1.0,
            "t": [0.0, 0.0, 0.0],
            "timestamp": self.timestamp
        })
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// Object map of a value, for tests that edit fields in place
pub fn object_mut(value: &mut Value) -> &mut Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture value is not an object: {}", other),
    }
}
