//! leapweb Test Harness - Frame document fixtures
//!
//! This crate provides:
//! - Builders for pointable, hand and frame records in the v6 schema
//! - Ready-made message streams (service handshake + frames)

pub mod fixtures;
pub mod messages;

pub use fixtures::*;
pub use messages::*;
