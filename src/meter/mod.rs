// src/meter/mod.rs

// Poll-driven engine, independent of any transport
pub mod engine;

// Engine bundled with a serial interface
pub mod sync_meter;

// Re-export the public structs
pub use engine::M9803rEngine;
pub use sync_meter::SyncMeter;
