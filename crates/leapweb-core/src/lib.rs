//! leapweb Core - Fundamental types for hand-tracking frames
//!
//! This crate defines the types shared by every other leapweb crate:
//! - Vector and quaternion primitives (Vector3, Vector4, Quaternion)
//! - The skeletal model (Frame → Hand → Arm/Finger → Bone)
//! - Field paths and the decode error taxonomy

pub mod error;
pub mod math;
pub mod model;
pub mod path;

pub use error::*;
pub use math::*;
pub use model::*;
pub use path::*;
