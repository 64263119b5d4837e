//! Configuration errors

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    /// A variable is set but cannot be parsed
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },

    /// The connection URL names a driver this service does not speak
    #[error("Unsupported database URL scheme: '{0}' (expected mysql:// or sqlite:)")]
    UnsupportedBackend(String),
}
