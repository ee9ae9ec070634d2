use crate::error::ConfigError;
use core_types::{Field, SensorKind};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub reports: ReportSettings,
    pub thresholds: ThresholdSettings,
    pub simulation: SimulationSettings,
}

impl Config {
    /// Checks the parts of the configuration serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;
        for kind in SensorKind::ALL {
            self.thresholds.for_sensor(kind)?;
        }
        if self.simulation.interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "simulation.interval_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP listener and CORS settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. `ALLOWED_ORIGINS` appends to this list.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = IpAddr::from_str(&self.host).map_err(|e| {
            ConfigError::ValidationError(format!("server.host '{}' is invalid: {e}", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Appends comma separated origins, ignoring blanks.
    pub fn extend_origins(&mut self, list: &str) {
        self.allowed_origins.extend(
            list.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string),
        );
    }

    /// Allowed origins without duplicates, in a stable order.
    pub fn cors_origins(&self) -> Vec<String> {
        self.allowed_origins
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Used when `RUST_LOG` is not set.
    pub level: LogLevel,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            directory: None,
            file_prefix: "sensorhub.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub sample_counts: SampleCounts,
}

/// Chart point budget per reporting period for document reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SampleCounts {
    pub today: usize,
    pub last7: usize,
    pub month: usize,
}

impl Default for SampleCounts {
    fn default() -> Self {
        Self {
            today: 8,
            last7: 7,
            month: 6,
        }
    }
}

/// Risk thresholds per sensor category, keyed by field name.
///
/// A category with no thresholds is reported without risk entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdSettings {
    pub gas: BTreeMap<String, f64>,
    pub motion: BTreeMap<String, f64>,
    pub particle: BTreeMap<String, f64>,
    pub camera: BTreeMap<String, f64>,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        let map = |entries: &[(&str, f64)]| {
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>()
        };
        Self {
            gas: map(&[("lpg", 800.0), ("co", 50.0), ("smoke", 300.0)]),
            motion: BTreeMap::new(),
            particle: map(&[("pm2_5", 35.0)]),
            camera: map(&[("latency_ms", 200.0)]),
        }
    }
}

impl ThresholdSettings {
    fn raw(&self, kind: SensorKind) -> &BTreeMap<String, f64> {
        match kind {
            SensorKind::Gas => &self.gas,
            SensorKind::Motion => &self.motion,
            SensorKind::Particle => &self.particle,
            SensorKind::Camera => &self.camera,
        }
    }

    /// Typed thresholds for `kind`, or `None` when the category declares none.
    ///
    /// Fails if a key is not a field of that category or a value is not finite.
    pub fn for_sensor(
        &self,
        kind: SensorKind,
    ) -> Result<Option<BTreeMap<Field, f64>>, ConfigError> {
        let raw = self.raw(kind);
        if raw.is_empty() {
            return Ok(None);
        }

        let mut typed = BTreeMap::new();
        for (name, &threshold) in raw {
            let field = Field::from_str(name).map_err(|e| {
                ConfigError::ValidationError(format!("thresholds.{kind}: {e}"))
            })?;
            if !kind.has_field(field) {
                return Err(ConfigError::ValidationError(format!(
                    "thresholds.{kind}: field '{name}' does not belong to the {kind} sensor"
                )));
            }
            if !threshold.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "thresholds.{kind}.{name} must be a finite number"
                )));
            }
            typed.insert(field, threshold);
        }
        Ok(Some(typed))
    }
}

/// Settings for the synthetic reading generators.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Seconds between two readings of the same category.
    pub interval_secs: u64,
    pub system_id: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            system_id: "1".to_string(),
        }
    }
}
