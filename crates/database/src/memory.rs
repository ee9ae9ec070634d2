use crate::error::DbError;
use crate::store::SensorStore;
use chrono::NaiveDateTime;
use core_types::{NewReading, SensorKind, SensorRecord};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// An in-process `SensorStore`. Clones share the same records.
///
/// Enforces the same camera-to-motion reference the PostgreSQL schema does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<SensorRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records across every category.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl SensorStore for MemoryStore {
    async fn insert(&self, reading: NewReading) -> Result<SensorRecord, DbError> {
        let mut records = self.records.write().await;

        if let NewReading::Camera(camera) = &reading {
            let exists = records
                .iter()
                .any(|r| r.kind() == SensorKind::Motion && r.id() == camera.motion_id);
            if !exists {
                return Err(DbError::InvalidReference(format!(
                    "motion reading {}",
                    camera.motion_id
                )));
            }
        }

        let record = reading.into_record(Uuid::new_v4());
        records.push(record.clone());
        tracing::debug!(
            sensor = %record.kind(),
            id = %record.id(),
            "Stored sensor reading in memory."
        );
        Ok(record)
    }

    async fn records_between(
        &self,
        kind: SensorKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<SensorRecord>, DbError> {
        let records = self.records.read().await;
        let mut matching: Vec<SensorRecord> = records
            .iter()
            .filter(|r| r.kind() == kind && r.timestamp() >= start && r.timestamp() <= end)
            .cloned()
            .collect();
        matching.sort_by_key(SensorRecord::timestamp);
        Ok(matching)
    }

    async fn all_records(&self, kind: SensorKind) -> Result<Vec<SensorRecord>, DbError> {
        let records = self.records.read().await;
        let mut matching: Vec<SensorRecord> =
            records.iter().filter(|r| r.kind() == kind).cloned().collect();
        matching.sort_by_key(SensorRecord::timestamp);
        Ok(matching)
    }

    async fn latest_record(&self, kind: SensorKind) -> Result<Option<SensorRecord>, DbError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.kind() == kind)
            .max_by_key(|r| r.timestamp())
            .cloned())
    }
}
