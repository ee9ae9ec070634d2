//! Report use-cases shared by the HTTP handlers and the CLI: resolve the
//! period, fetch the snapshot, run the engine, optionally render.

use crate::error::AppError;
use crate::AppState;
use analytics::{
    resolve_period, Period, PeriodKind, ReportOptions, SensorReport, SeriesMode, StatisticsView,
    Thresholds,
};
use core_types::{Reading, SensorKind};
use database::SensorStore;

/// A rendered document ready to be sent to the client.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

impl<S: SensorStore> AppState<S> {
    async fn snapshot(
        &self,
        kind: SensorKind,
        period: &str,
    ) -> Result<(Period, Vec<Reading>), AppError> {
        let period = resolve_period(period, self.today())?;
        let readings = self
            .store
            .readings_between(kind, period.start, period.end)
            .await?;
        Ok((period, readings))
    }

    fn thresholds(&self, kind: SensorKind) -> Result<Option<Thresholds>, AppError> {
        Ok(self.config.thresholds.for_sensor(kind)?)
    }

    fn sample_count(&self, period: PeriodKind) -> usize {
        let counts = self.config.reports.sample_counts;
        match period {
            PeriodKind::Today => counts.today,
            PeriodKind::Last7 => counts.last7,
            PeriodKind::Month => counts.month,
        }
    }

    /// The plain statistics view. An empty period is not an error here.
    pub async fn statistics(
        &self,
        kind: SensorKind,
        period: &str,
    ) -> Result<StatisticsView, AppError> {
        let (period, readings) = self.snapshot(kind, period).await?;
        Ok(self.engine.summarize(&period.label, &readings, kind.fields()))
    }

    /// The full report with risk and the complete chronological series.
    pub async fn report(&self, kind: SensorKind, period: &str) -> Result<SensorReport, AppError> {
        let (period, readings) = self.snapshot(kind, period).await?;
        let options = ReportOptions::new(self.thresholds(kind)?, SeriesMode::Full);
        Ok(self
            .engine
            .assemble(&period.label, &readings, kind.fields(), &options)?)
    }

    /// The downsampled report rendered into a document.
    pub async fn document(
        &self,
        kind: SensorKind,
        period: &str,
    ) -> Result<RenderedReport, AppError> {
        let (period, readings) = self.snapshot(kind, period).await?;
        let thresholds = self.thresholds(kind)?;
        let options = ReportOptions::new(
            thresholds.clone(),
            SeriesMode::Downsampled(self.sample_count(period.kind)),
        );
        let report = self
            .engine
            .assemble(&period.label, &readings, kind.fields(), &options)?;

        let bytes = self.renderer.render(kind, &report, thresholds.as_ref())?;
        tracing::info!(
            sensor = %kind,
            period = %period.kind,
            bytes = bytes.len(),
            "Document report generated."
        );

        Ok(RenderedReport {
            bytes,
            content_type: self.renderer.content_type(),
            filename: format!("{kind}_report_{}.{}", period.kind, self.renderer.extension()),
        })
    }
}
