use crate::risk::{RiskEntry, Thresholds};
use crate::statistics::{FieldStats, StatsSummary};
use chrono::NaiveDateTime;
use core_types::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A reading projected onto the fields of interest, as `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub timestamp: NaiveDateTime,
    pub fields: BTreeMap<Field, f64>,
}

/// One chart point: `x` is the timestamp, `y` the field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: NaiveDateTime,
    pub y: f64,
}

/// How much of the time series a report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesMode {
    /// Statistics only.
    Omit,
    /// Every reading, in chronological order.
    #[default]
    Full,
    /// Chronological and reduced to at most this many points, for charts.
    Downsampled(usize),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    /// `None` skips risk evaluation entirely.
    pub thresholds: Option<Thresholds>,
    pub series: SeriesMode,
}

impl ReportOptions {
    pub fn new(thresholds: Option<Thresholds>, series: SeriesMode) -> Self {
        Self { thresholds, series }
    }
}

/// The structured result of one report request. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReport {
    pub label: String,
    pub count: usize,
    pub stats: BTreeMap<Field, FieldStats>,
    pub risk: BTreeMap<Field, RiskEntry>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub series: BTreeMap<Field, Vec<SeriesPoint>>,
}

impl SensorReport {
    /// The sampled values of one field, in series order.
    pub fn series_values(&self, field: Field) -> Vec<f64> {
        self.series
            .get(&field)
            .map(|points| points.iter().map(|p| p.y).collect())
            .unwrap_or_default()
    }
}

/// The plain statistics view: label plus per-field stats and count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsView {
    pub label: String,
    pub stats: StatsSummary,
}
