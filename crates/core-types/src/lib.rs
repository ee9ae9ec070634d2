//! # SensorHub Core Types
//!
//! Layer 0 crate shared by every other crate in the workspace. It defines the
//! sensor catalogue (`SensorKind`, `Field`), the engine-facing `Reading`, and the
//! category-specific records that are stored in and fetched from the database.
//!
//! Nothing in here performs I/O.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Field, SensorKind};
pub use error::CoreError;
pub use structs::{
    CameraRecord, GasRecord, MotionRecord, NewCameraReading, NewGasReading, NewMotionReading,
    NewParticleReading, NewReading, ParticleRecord, Reading, SensorRecord,
};
