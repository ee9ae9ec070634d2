use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    Config, LogLevel, LoggingSettings, ReportSettings, SampleCounts, ServerSettings,
    SimulationSettings, ThresholdSettings,
};

/// Prefix for environment overrides, e.g. `SENSORHUB__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "SENSORHUB";

/// Loads the application configuration from the `config.toml` file.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Loads configuration from `path`, layered with environment overrides.
///
/// The file is optional: every section has defaults, so a missing file yields
/// the stock sensor thresholds and sample counts. The result is validated before
/// it is returned.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(environment())
        .build()?;

    let mut config = builder.try_deserialize::<Config>()?;

    // Deployments historically extend CORS through a plain comma separated variable.
    if let Ok(extra) = std::env::var("ALLOWED_ORIGINS") {
        config.server.extend_origins(&extra);
    }

    config.validate()?;
    Ok(config)
}

/// Parses configuration from an in-memory TOML document. Environment overrides
/// are not applied.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("server.allowed_origins")
        .try_parsing(true)
}
