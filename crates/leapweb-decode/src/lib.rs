//! leapweb Decode - v6 frame records into the skeletal model
//!
//! Decoding is bottom-up and pure:
//! frame → hand → finger → bone → vector/orientation.
//!
//! Every record is checked against its schema before anything is read, and
//! any failure below the hand-count dispatch aborts the whole frame with a
//! single [`DecodeError`](leapweb_core::DecodeError) naming the field path.

pub mod bone;
pub mod finger;
pub mod frame;
pub mod hand;
pub mod record;
pub mod vector;

pub use bone::build_bone;
pub use finger::{build_finger, POINTABLE_SCHEMA};
pub use frame::{build_frame, FRAME_SCHEMA};
pub use hand::{build_hand, HAND_SCHEMA};
pub use record::{field, FieldSpec, Record, RecordList};
pub use vector::{build_basis, build_orientation, build_vector3, build_vector4};
