use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DbConfig};

/// Loads the service configuration from the file at `path`.
///
/// The format is picked from the file extension (`.toml`, `.yaml`, ...).
/// After deserializing, the values are checked so that an obviously broken
/// file fails at startup rather than on the first request.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    from_source(config::File::from(path))
}

fn from_source<S>(source: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder().add_source(source).build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let checks = [
        ("port", config.port == 0, "must be non-zero"),
        ("request_timeout_secs", config.request_timeout_secs == 0, "must be non-zero"),
        ("db.port", config.db.port == 0, "must be non-zero"),
        ("db.user", config.db.user.is_empty(), "must be set"),
        ("db.dbname", config.db.dbname.is_empty(), "must be set"),
    ];
    match checks.into_iter().find(|(_, failed, _)| *failed) {
        Some((key, _, reason)) => Err(ConfigError::InvalidValue { key, reason }),
        None => Ok(()),
    }
}
