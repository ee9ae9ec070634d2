//! # SensorHub Database Crate
//!
//! This crate is the storage collaborator of the reporting engine: it persists
//! sensor readings and hands period-bounded snapshots back to callers.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All SQL lives here. The rest of the application talks to
//!   storage through the `SensorStore` trait and never sees a query.
//! - **Injected, not global:** A `DbRepository` is constructed once at startup and
//!   passed to whoever needs it. There is no process-wide session.
//! - **Asynchronous & Pooled:** All operations are asynchronous, and it uses a
//!   connection pool (`PgPool`) for concurrent database access.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: Establish the pool and bring the schema up to date.
//! - `SensorStore`: The storage boundary trait.
//! - `DbRepository`: PostgreSQL implementation of `SensorStore`.
//! - `MemoryStore`: In-process implementation, used for demos and tests.
//! - `DbError`: The specific error types that can be returned from this crate.

pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::MemoryStore;
pub use repository::DbRepository;
pub use store::SensorStore;
