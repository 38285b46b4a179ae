// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod common;
pub mod meter;

// Re-export key types for convenience
pub use common::{DecodeStatus, DecodedReading, DecoderConfig, M9803rError, Unit};
pub use meter::{M9803rEngine, SyncMeter};
