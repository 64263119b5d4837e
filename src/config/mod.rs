//! Service configuration
//!
//! All settings are read from the process environment at startup. CLI flags
//! may override individual fields afterwards.

mod database;
mod errors;

pub use database::{DatabaseBackend, DatabaseConfig};
pub use errors::{ConfigError, ConfigResult};

pub(crate) use database::parse_var;

use crate::http_server::HttpServerConfig;

/// Complete configuration for one service process
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub http: HttpServerConfig,
    pub database: DatabaseConfig,
}

impl ServiceConfig {
    /// Load from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            http: HttpServerConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
        })
    }
}
