use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The sensor categories the system ingests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Gas,
    Motion,
    Particle,
    Camera,
}

impl SensorKind {
    pub const ALL: [SensorKind; 4] = [
        SensorKind::Gas,
        SensorKind::Motion,
        SensorKind::Particle,
        SensorKind::Camera,
    ];

    /// The numeric fields a reading of this category carries, in display order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            SensorKind::Gas => &[Field::Lpg, Field::Co, Field::Smoke],
            SensorKind::Motion => &[Field::Intensity],
            SensorKind::Particle => &[Field::Pm1, Field::Pm25, Field::Pm10],
            SensorKind::Camera => &[Field::LatencyMs],
        }
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Gas => "gas",
            SensorKind::Motion => "motion",
            SensorKind::Particle => "particle",
            SensorKind::Camera => "camera",
        }
    }

    /// Human-facing name used in document titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            SensorKind::Gas => "Gas",
            SensorKind::Motion => "Motion",
            SensorKind::Particle => "Particle",
            SensorKind::Camera => "Camera",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSensor(s.to_string()))
    }
}

/// A numeric measurement carried by a reading.
///
/// Every field belongs to exactly one `SensorKind`; see [`SensorKind::fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "lpg")]
    Lpg,
    #[serde(rename = "co")]
    Co,
    #[serde(rename = "smoke")]
    Smoke,
    #[serde(rename = "intensity")]
    Intensity,
    #[serde(rename = "pm1_0")]
    Pm1,
    #[serde(rename = "pm2_5")]
    Pm25,
    #[serde(rename = "pm10")]
    Pm10,
    #[serde(rename = "latency_ms")]
    LatencyMs,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Lpg,
        Field::Co,
        Field::Smoke,
        Field::Intensity,
        Field::Pm1,
        Field::Pm25,
        Field::Pm10,
        Field::LatencyMs,
    ];

    /// The column / JSON key for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Lpg => "lpg",
            Field::Co => "co",
            Field::Smoke => "smoke",
            Field::Intensity => "intensity",
            Field::Pm1 => "pm1_0",
            Field::Pm25 => "pm2_5",
            Field::Pm10 => "pm10",
            Field::LatencyMs => "latency_ms",
        }
    }

    /// Label used on charts and in generated documents.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Lpg => "LPG",
            Field::Co => "CO",
            Field::Smoke => "Smoke",
            Field::Intensity => "Intensity",
            Field::Pm1 => "PM1.0",
            Field::Pm25 => "PM2.5",
            Field::Pm10 => "PM10",
            Field::LatencyMs => "Latency",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}
