//! HTTP Server Configuration
//!
//! Configuration for the HTTP server including host, port, and CORS settings.

use serde::{Deserialize, Serialize};

use crate::config::{parse_var, ConfigResult};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read `CATALOG_HOST`, `CATALOG_PORT` and `CATALOG_CORS_ORIGINS`
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("CATALOG_HOST").filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(raw) = lookup("CATALOG_PORT") {
            config.port = parse_var("CATALOG_PORT", &raw)?;
        }
        if let Some(raw) = lookup("CATALOG_CORS_ORIGINS") {
            config.cors_origins = raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_from_lookup() {
        let config = HttpServerConfig::from_lookup(|key| match key {
            "CATALOG_HOST" => Some("127.0.0.1".to_string()),
            "CATALOG_PORT" => Some("9000".to_string()),
            "CATALOG_CORS_ORIGINS" => Some("http://a.test, ,http://b.test".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_bad_port() {
        let err = HttpServerConfig::from_lookup(|key| {
            (key == "CATALOG_PORT").then(|| "70000".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "CATALOG_PORT", .. }));
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        let expected = HttpServerConfig::from_lookup(|key| std::env::var(key).ok());
        assert_eq!(HttpServerConfig::from_env(), expected);
    }
}
