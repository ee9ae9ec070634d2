use crate::error::DbError;
use chrono::NaiveDateTime;
use core_types::{NewReading, Reading, SensorKind, SensorRecord};
use std::future::Future;
use uuid::Uuid;

/// The storage boundary shared by the HTTP layer, the simulators and the CLI.
///
/// Implementations are cheap to clone handles onto shared storage. Range
/// queries are inclusive on both ends.
pub trait SensorStore: Clone + Send + Sync + 'static {
    /// Stores a reading and returns it as persisted, with its new id.
    fn insert(
        &self,
        reading: NewReading,
    ) -> impl Future<Output = Result<SensorRecord, DbError>> + Send;

    /// Records of `kind` with `start <= timestamp <= end`.
    fn records_between(
        &self,
        kind: SensorKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Future<Output = Result<Vec<SensorRecord>, DbError>> + Send;

    fn all_records(
        &self,
        kind: SensorKind,
    ) -> impl Future<Output = Result<Vec<SensorRecord>, DbError>> + Send;

    /// The record of `kind` with the greatest timestamp, if any.
    fn latest_record(
        &self,
        kind: SensorKind,
    ) -> impl Future<Output = Result<Option<SensorRecord>, DbError>> + Send;

    /// Same range as [`records_between`](Self::records_between), projected to
    /// the engine's `Reading` shape.
    fn readings_between(
        &self,
        kind: SensorKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Future<Output = Result<Vec<Reading>, DbError>> + Send {
        async move {
            let records = self.records_between(kind, start, end).await?;
            Ok(records.iter().map(SensorRecord::to_reading).collect())
        }
    }

    /// Id of the most recent motion reading; camera captures reference one.
    fn latest_motion_id(&self) -> impl Future<Output = Result<Option<Uuid>, DbError>> + Send {
        async move {
            let latest = self.latest_record(SensorKind::Motion).await?;
            Ok(latest.map(|record| record.id()))
        }
    }
}
