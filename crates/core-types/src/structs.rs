use crate::enums::{Field, SensorKind};
use crate::error::CoreError;
use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;

/// One timestamped sensor observation, reduced to its numeric fields.
///
/// This is the only shape the analytics engine sees. Category-specific columns
/// that are not numeric measurements (image paths, detection flags) are dropped
/// when a record is converted into a `Reading`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub system_id: String,
    pub values: BTreeMap<Field, Decimal>,
}

impl Reading {
    pub fn new(timestamp: NaiveDateTime, system_id: impl Into<String>) -> Self {
        Self {
            timestamp,
            system_id: system_id.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style helper used when projecting records and in tests.
    pub fn with_value(mut self, field: Field, value: Decimal) -> Self {
        self.values.insert(field, value);
        self
    }

    /// Returns the field as a double. Fixed-point values lose anything beyond
    /// `f64` precision here.
    pub fn value(&self, field: Field) -> Option<f64> {
        self.values.get(&field).and_then(|v| v.to_f64())
    }
}

// ==============================================================================
// Stored records (one struct per table)
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GasRecord {
    pub id: Uuid,
    pub timestamp: NaiveDateTime,
    pub lpg: Decimal,
    pub co: Decimal,
    pub smoke: Decimal,
    pub system_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MotionRecord {
    pub id: Uuid,
    pub timestamp: NaiveDateTime,
    pub motion_detected: bool,
    pub intensity: Decimal,
    pub system_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ParticleRecord {
    pub id: Uuid,
    pub timestamp: NaiveDateTime,
    pub pm1_0: Decimal,
    pub pm2_5: Decimal,
    pub pm10: Decimal,
    pub system_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CameraRecord {
    pub id: Uuid,
    pub timestamp: NaiveDateTime,
    pub image_path: String,
    pub motion_id: Uuid,
    pub latency_ms: i32,
    pub system_id: String,
}

impl From<&GasRecord> for Reading {
    fn from(r: &GasRecord) -> Self {
        Reading::new(r.timestamp, r.system_id.clone())
            .with_value(Field::Lpg, r.lpg)
            .with_value(Field::Co, r.co)
            .with_value(Field::Smoke, r.smoke)
    }
}

impl From<&MotionRecord> for Reading {
    fn from(r: &MotionRecord) -> Self {
        Reading::new(r.timestamp, r.system_id.clone()).with_value(Field::Intensity, r.intensity)
    }
}

impl From<&ParticleRecord> for Reading {
    fn from(r: &ParticleRecord) -> Self {
        Reading::new(r.timestamp, r.system_id.clone())
            .with_value(Field::Pm1, r.pm1_0)
            .with_value(Field::Pm25, r.pm2_5)
            .with_value(Field::Pm10, r.pm10)
    }
}

impl From<&CameraRecord> for Reading {
    fn from(r: &CameraRecord) -> Self {
        Reading::new(r.timestamp, r.system_id.clone())
            .with_value(Field::LatencyMs, Decimal::from(r.latency_ms))
    }
}

/// A stored record of any category, as returned by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorRecord {
    Gas(GasRecord),
    Motion(MotionRecord),
    Particle(ParticleRecord),
    Camera(CameraRecord),
}

impl SensorRecord {
    pub fn kind(&self) -> SensorKind {
        match self {
            SensorRecord::Gas(_) => SensorKind::Gas,
            SensorRecord::Motion(_) => SensorKind::Motion,
            SensorRecord::Particle(_) => SensorKind::Particle,
            SensorRecord::Camera(_) => SensorKind::Camera,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            SensorRecord::Gas(r) => r.id,
            SensorRecord::Motion(r) => r.id,
            SensorRecord::Particle(r) => r.id,
            SensorRecord::Camera(r) => r.id,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            SensorRecord::Gas(r) => r.timestamp,
            SensorRecord::Motion(r) => r.timestamp,
            SensorRecord::Particle(r) => r.timestamp,
            SensorRecord::Camera(r) => r.timestamp,
        }
    }

    pub fn to_reading(&self) -> Reading {
        match self {
            SensorRecord::Gas(r) => r.into(),
            SensorRecord::Motion(r) => r.into(),
            SensorRecord::Particle(r) => r.into(),
            SensorRecord::Camera(r) => r.into(),
        }
    }
}

// ==============================================================================
// Ingestion payloads
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGasReading {
    pub timestamp: NaiveDateTime,
    pub lpg: Decimal,
    pub co: Decimal,
    pub smoke: Decimal,
    pub system_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMotionReading {
    pub timestamp: NaiveDateTime,
    pub motion_detected: bool,
    pub intensity: Decimal,
    pub system_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewParticleReading {
    pub timestamp: NaiveDateTime,
    pub pm1_0: Decimal,
    pub pm2_5: Decimal,
    pub pm10: Decimal,
    pub system_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCameraReading {
    pub timestamp: NaiveDateTime,
    pub image_path: String,
    pub motion_id: Uuid,
    pub latency_ms: i32,
    pub system_id: String,
}

/// A reading that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub enum NewReading {
    Gas(NewGasReading),
    Motion(NewMotionReading),
    Particle(NewParticleReading),
    Camera(NewCameraReading),
}

impl NewReading {
    /// Parses an ingestion body whose shape is decided by the sensor category
    /// in the request path.
    pub fn from_json(kind: SensorKind, body: serde_json::Value) -> Result<Self, CoreError> {
        let invalid = |e: serde_json::Error| CoreError::InvalidInput(kind.to_string(), e.to_string());
        let reading = match kind {
            SensorKind::Gas => NewReading::Gas(serde_json::from_value(body).map_err(invalid)?),
            SensorKind::Motion => NewReading::Motion(serde_json::from_value(body).map_err(invalid)?),
            SensorKind::Particle => {
                NewReading::Particle(serde_json::from_value(body).map_err(invalid)?)
            }
            SensorKind::Camera => NewReading::Camera(serde_json::from_value(body).map_err(invalid)?),
        };
        Ok(reading)
    }

    pub fn kind(&self) -> SensorKind {
        match self {
            NewReading::Gas(_) => SensorKind::Gas,
            NewReading::Motion(_) => SensorKind::Motion,
            NewReading::Particle(_) => SensorKind::Particle,
            NewReading::Camera(_) => SensorKind::Camera,
        }
    }

    /// The record this reading becomes once stored under `id`.
    pub fn into_record(self, id: Uuid) -> SensorRecord {
        match self {
            NewReading::Gas(r) => SensorRecord::Gas(GasRecord {
                id,
                timestamp: r.timestamp,
                lpg: r.lpg,
                co: r.co,
                smoke: r.smoke,
                system_id: r.system_id,
            }),
            NewReading::Motion(r) => SensorRecord::Motion(MotionRecord {
                id,
                timestamp: r.timestamp,
                motion_detected: r.motion_detected,
                intensity: r.intensity,
                system_id: r.system_id,
            }),
            NewReading::Particle(r) => SensorRecord::Particle(ParticleRecord {
                id,
                timestamp: r.timestamp,
                pm1_0: r.pm1_0,
                pm2_5: r.pm2_5,
                pm10: r.pm10,
                system_id: r.system_id,
            }),
            NewReading::Camera(r) => SensorRecord::Camera(CameraRecord {
                id,
                timestamp: r.timestamp,
                image_path: r.image_path,
                motion_id: r.motion_id,
                latency_ms: r.latency_ms,
                system_id: r.system_id,
            }),
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            NewReading::Gas(r) => r.timestamp,
            NewReading::Motion(r) => r.timestamp,
            NewReading::Particle(r) => r.timestamp,
            NewReading::Camera(r) => r.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn gas_record_projects_all_three_fields() {
        let record = GasRecord {
            id: Uuid::new_v4(),
            timestamp: ts(),
            lpg: dec!(812.25),
            co: dec!(12.5),
            smoke: dec!(99.99),
            system_id: "1".to_string(),
        };
        let reading = Reading::from(&record);
        assert_eq!(reading.values.len(), 3);
        assert_eq!(reading.value(Field::Lpg), Some(812.25));
        assert_eq!(reading.value(Field::Co), Some(12.5));
        assert_eq!(reading.value(Field::Intensity), None);
    }

    #[test]
    fn camera_latency_becomes_a_numeric_field() {
        let record = SensorRecord::Camera(CameraRecord {
            id: Uuid::new_v4(),
            timestamp: ts(),
            image_path: "/uploads/img_1.jpg".to_string(),
            motion_id: Uuid::new_v4(),
            latency_ms: 215,
            system_id: "1".to_string(),
        });
        assert_eq!(record.kind(), SensorKind::Camera);
        assert_eq!(record.to_reading().value(Field::LatencyMs), Some(215.0));
    }

    #[test]
    fn payload_shape_follows_the_sensor_kind() {
        let body = json!({
            "timestamp": "2024-03-15T10:30:00",
            "lpg": 500.5,
            "co": 20.0,
            "smoke": 130.0,
            "system_id": "1"
        });
        let reading = NewReading::from_json(SensorKind::Gas, body.clone()).unwrap();
        assert_eq!(reading.kind(), SensorKind::Gas);
        assert_eq!(reading.timestamp(), ts());

        let err = NewReading::from_json(SensorKind::Particle, body).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(sensor, _) if sensor == "particle"));
    }

    #[test]
    fn records_serialize_as_flat_json() {
        let record = SensorRecord::Motion(MotionRecord {
            id: Uuid::nil(),
            timestamp: ts(),
            motion_detected: true,
            intensity: dec!(4.5),
            system_id: "1".to_string(),
        });
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["motion_detected"], json!(true));
        assert_eq!(value["intensity"], json!(4.5));
        assert_eq!(value["timestamp"], json!("2024-03-15T10:30:00"));
    }
}
