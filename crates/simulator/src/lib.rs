//! # SensorHub Simulator Crate
//!
//! Synthetic data sources for development and demos. Nothing in here is part
//! of report computation; simulators only ever talk to the `SensorStore`.
//!
//! ## Public API
//!
//! - `generate`: Draws one random reading for a sensor category.
//! - `SimulatorHandle`: Runs one periodic task per category with explicit
//!   `start` / `stop`.
//! - `seed_history` / `backfill_camera_captures`: Deterministic fixtures for a
//!   fresh database.
//! - `SimulatorError`: The specific error types that can be returned from this crate.

pub mod error;
pub mod generator;
pub mod runner;
pub mod seed;

pub use error::SimulatorError;
pub use generator::generate;
pub use runner::SimulatorHandle;
pub use seed::{backfill_camera_captures, seed_history, seed_offset, SEED_OFFSETS_DAYS};
