//! leapweb Runtime - drives decoding from a live message stream
//!
//! This crate provides:
//! - Processor configuration with environment overrides
//! - Logging setup
//! - The frame processor: latest-frame store, hand presence, statistics

pub mod config;
pub mod error;
pub mod presentation;
pub mod processor;
pub mod telemetry;

pub use config::*;
pub use error::*;
pub use presentation::*;
pub use processor::*;
pub use telemetry::*;
