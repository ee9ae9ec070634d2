//! # SensorHub Analytics Engine
//!
//! This crate turns a snapshot of sensor readings into period-scoped reports:
//! statistics per field, threshold risk, and chart-ready series.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of databases,
//!   HTTP or rendering. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every component is a function of its inputs. The
//!   `AnalyticsEngine` holds no state between calls, so concurrent requests can share it.
//!
//! ## Public API
//!
//! - `resolve_period`: Maps `today` / `last7` / `month` onto concrete bounds and a label.
//! - `compute_stats`: Count, mean, min and max per field.
//! - `evaluate_risk`: Fraction of readings above each configured threshold.
//! - `downsample`: Deterministic stride selection for charts.
//! - `AnalyticsEngine`: Assembles all of the above into a `SensorReport`.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

pub mod downsampling;
pub mod engine;
pub mod error;
pub mod period;
pub mod report;
pub mod risk;
pub mod statistics;

// Re-export the key components to create a clean, public-facing API.
pub use downsampling::{downsample, stride_indices};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use period::{resolve_period, Period, PeriodKind};
pub use report::{ReportOptions, SamplePoint, SensorReport, SeriesMode, SeriesPoint, StatisticsView};
pub use risk::{evaluate_risk, RiskEntry, Thresholds};
pub use statistics::{compute_stats, FieldStats, StatsSummary};
