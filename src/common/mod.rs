// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod buffer;
pub mod config;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod packet;
pub mod timing;
pub mod types;
pub mod units;

// --- Re-export key types/traits/functions for easier access ---

// From buffer.rs
pub use buffer::FrameAccumulator;

// From config.rs
pub use config::DecoderConfig;

// From error.rs
pub use error::M9803rError;

// From frame.rs
pub use frame::{encode_frame, find_terminator, BUFFER_CAPACITY, FRAME_LEN, PAYLOAD_LEN, TERMINATOR};

// From hal_traits.rs
pub use hal_traits::M9803rSerial;

// From packet.rs
pub use packet::{decode, decode_packet, extract, RawPacket, StatusFlags};

// From types.rs
pub use types::{DecodeStatus, DecodedReading};

// From units.rs
pub use units::{scale_factor, unit_symbol, MeasurementMode, Unit};

// timing.rs constants are accessed via common::timing::*

// Native HAL adapter (from hal_traits.rs)
#[cfg(feature = "impl-native")]
pub use hal_traits::NativeAdapter;
