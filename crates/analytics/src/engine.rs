use crate::downsampling::downsample;
use crate::error::AnalyticsError;
use crate::report::{ReportOptions, SamplePoint, SensorReport, SeriesMode, SeriesPoint, StatisticsView};
use crate::risk::evaluate_risk;
use crate::statistics::compute_stats;
use core_types::{Field, Reading};
use std::collections::BTreeMap;

/// A stateless assembler that turns a snapshot of readings into reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the plain statistics view. Unlike [`assemble`](Self::assemble)
    /// this never fails: an empty snapshot yields `count = 0` and absent values.
    pub fn summarize(&self, label: &str, records: &[Reading], fields: &[Field]) -> StatisticsView {
        StatisticsView {
            label: label.to_string(),
            stats: compute_stats(records, fields),
        }
    }

    /// The main entry point for building a report.
    ///
    /// # Arguments
    ///
    /// * `label` - The resolved period label.
    /// * `records` - Readings already filtered to the period, in any order.
    /// * `fields` - The fields to report on.
    /// * `options` - Thresholds for risk evaluation and the series shape.
    ///
    /// # Returns
    ///
    /// The assembled `SensorReport`, or `AnalyticsError::NoData` when `records`
    /// is empty. No partial report is ever returned.
    pub fn assemble(
        &self,
        label: &str,
        records: &[Reading],
        fields: &[Field],
        options: &ReportOptions,
    ) -> Result<SensorReport, AnalyticsError> {
        if records.is_empty() {
            return Err(AnalyticsError::NoData);
        }

        let summary = compute_stats(records, fields);

        let risk = options
            .thresholds
            .as_ref()
            .map(|thresholds| evaluate_risk(records, thresholds))
            .unwrap_or_default();

        let series = match options.series {
            SeriesMode::Omit => BTreeMap::new(),
            SeriesMode::Full => self.build_series(&sample_points(records, fields), fields),
            SeriesMode::Downsampled(count) => {
                let points = downsample(sample_points(records, fields), count);
                self.build_series(&points, fields)
            }
        };

        tracing::debug!(
            label,
            count = summary.count,
            risk_fields = risk.len(),
            series_fields = series.len(),
            "Assembled sensor report."
        );

        Ok(SensorReport {
            label: label.to_string(),
            count: summary.count,
            stats: summary.fields,
            risk,
            series,
        })
    }

    /// Splits the sample points into one `{x, y}` sequence per field.
    fn build_series(
        &self,
        points: &[SamplePoint],
        fields: &[Field],
    ) -> BTreeMap<Field, Vec<SeriesPoint>> {
        fields
            .iter()
            .map(|&field| {
                let series = points
                    .iter()
                    .filter_map(|p| {
                        p.fields.get(&field).map(|&y| SeriesPoint {
                            x: p.timestamp,
                            y,
                        })
                    })
                    .collect();
                (field, series)
            })
            .collect()
    }
}

/// Projects `records` onto `fields`, ordered by timestamp.
///
/// The sort is stable, so readings sharing a timestamp keep their input order.
pub fn sample_points(records: &[Reading], fields: &[Field]) -> Vec<SamplePoint> {
    let mut ordered: Vec<&Reading> = records.iter().collect();
    ordered.sort_by_key(|r| r.timestamp);

    ordered
        .into_iter()
        .map(|r| SamplePoint {
            timestamp: r.timestamp,
            fields: fields
                .iter()
                .filter_map(|&f| r.value(f).map(|v| (f, v)))
                .collect(),
        })
        .collect()
}
