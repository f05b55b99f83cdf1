use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: &'static str },
}
