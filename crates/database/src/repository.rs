use crate::error::DbError;
use crate::store::SensorStore;
use chrono::NaiveDateTime;
use core_types::{
    CameraRecord, GasRecord, MotionRecord, NewReading, ParticleRecord, SensorKind, SensorRecord,
};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::FromRow;
use uuid::Uuid;

/// The `DbRepository` provides the PostgreSQL implementation of the storage
/// boundary. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

fn table(kind: SensorKind) -> &'static str {
    match kind {
        SensorKind::Gas => "gas_sensor",
        SensorKind::Motion => "motion_sensors",
        SensorKind::Particle => "particle_sensor",
        SensorKind::Camera => "camera_capture",
    }
}

fn columns(kind: SensorKind) -> &'static str {
    match kind {
        SensorKind::Gas => r#"id, "timestamp", lpg, co, smoke, system_id"#,
        SensorKind::Motion => r#"id, "timestamp", motion_detected, intensity, system_id"#,
        SensorKind::Particle => r#"id, "timestamp", pm1_0, pm2_5, pm10, system_id"#,
        SensorKind::Camera => r#"id, "timestamp", image_path, motion_id, latency_ms, system_id"#,
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs a `SELECT` for `kind` with an optional `WHERE`/`ORDER` suffix and
    /// binds up to two timestamps.
    async fn select(
        &self,
        kind: SensorKind,
        suffix: &str,
        range: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> Result<Vec<SensorRecord>, DbError> {
        let sql = format!("SELECT {} FROM {} {}", columns(kind), table(kind), suffix);
        let records = match kind {
            SensorKind::Gas => self
                .fetch::<GasRecord>(&sql, range)
                .await?
                .into_iter()
                .map(SensorRecord::Gas)
                .collect(),
            SensorKind::Motion => self
                .fetch::<MotionRecord>(&sql, range)
                .await?
                .into_iter()
                .map(SensorRecord::Motion)
                .collect(),
            SensorKind::Particle => self
                .fetch::<ParticleRecord>(&sql, range)
                .await?
                .into_iter()
                .map(SensorRecord::Particle)
                .collect(),
            SensorKind::Camera => self
                .fetch::<CameraRecord>(&sql, range)
                .await?
                .into_iter()
                .map(SensorRecord::Camera)
                .collect(),
        };
        Ok(records)
    }

    async fn fetch<T>(
        &self,
        sql: &str,
        range: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> Result<Vec<T>, DbError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        if let Some((start, end)) = range {
            query = query.bind(start).bind(end);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

impl SensorStore for DbRepository {
    async fn insert(&self, reading: NewReading) -> Result<SensorRecord, DbError> {
        let id = Uuid::new_v4();
        let kind = reading.kind();
        let record = match reading {
            NewReading::Gas(r) => SensorRecord::Gas(
                sqlx::query_as::<_, GasRecord>(
                    r#"INSERT INTO gas_sensor (id, "timestamp", lpg, co, smoke, system_id)
                       VALUES ($1, $2, $3, $4, $5, $6)
                       RETURNING id, "timestamp", lpg, co, smoke, system_id"#,
                )
                .bind(id)
                .bind(r.timestamp)
                .bind(r.lpg)
                .bind(r.co)
                .bind(r.smoke)
                .bind(r.system_id)
                .fetch_one(&self.pool)
                .await?,
            ),
            NewReading::Motion(r) => SensorRecord::Motion(
                sqlx::query_as::<_, MotionRecord>(
                    r#"INSERT INTO motion_sensors (id, "timestamp", motion_detected, intensity, system_id)
                       VALUES ($1, $2, $3, $4, $5)
                       RETURNING id, "timestamp", motion_detected, intensity, system_id"#,
                )
                .bind(id)
                .bind(r.timestamp)
                .bind(r.motion_detected)
                .bind(r.intensity)
                .bind(r.system_id)
                .fetch_one(&self.pool)
                .await?,
            ),
            NewReading::Particle(r) => SensorRecord::Particle(
                sqlx::query_as::<_, ParticleRecord>(
                    r#"INSERT INTO particle_sensor (id, "timestamp", pm1_0, pm2_5, pm10, system_id)
                       VALUES ($1, $2, $3, $4, $5, $6)
                       RETURNING id, "timestamp", pm1_0, pm2_5, pm10, system_id"#,
                )
                .bind(id)
                .bind(r.timestamp)
                .bind(r.pm1_0)
                .bind(r.pm2_5)
                .bind(r.pm10)
                .bind(r.system_id)
                .fetch_one(&self.pool)
                .await?,
            ),
            NewReading::Camera(r) => {
                let motion_id = r.motion_id;
                let record = sqlx::query_as::<_, CameraRecord>(
                    r#"INSERT INTO camera_capture (id, "timestamp", image_path, motion_id, latency_ms, system_id)
                       VALUES ($1, $2, $3, $4, $5, $6)
                       RETURNING id, "timestamp", image_path, motion_id, latency_ms, system_id"#,
                )
                .bind(id)
                .bind(r.timestamp)
                .bind(r.image_path)
                .bind(motion_id)
                .bind(r.latency_ms)
                .bind(r.system_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| match e {
                    sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                        DbError::InvalidReference(format!("motion reading {motion_id}"))
                    }
                    other => DbError::QueryError(other),
                })?;
                SensorRecord::Camera(record)
            }
        };

        tracing::debug!(sensor = %kind, id = %id, "Stored sensor reading.");
        Ok(record)
    }

    async fn records_between(
        &self,
        kind: SensorKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<SensorRecord>, DbError> {
        self.select(
            kind,
            r#"WHERE "timestamp" BETWEEN $1 AND $2 ORDER BY "timestamp""#,
            Some((start, end)),
        )
        .await
    }

    async fn all_records(&self, kind: SensorKind) -> Result<Vec<SensorRecord>, DbError> {
        self.select(kind, r#"ORDER BY "timestamp""#, None).await
    }

    async fn latest_record(&self, kind: SensorKind) -> Result<Option<SensorRecord>, DbError> {
        let mut latest = self
            .select(kind, r#"ORDER BY "timestamp" DESC LIMIT 1"#, None)
            .await?;
        Ok(latest.pop())
    }
}
