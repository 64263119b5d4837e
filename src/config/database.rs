//! Database connection configuration
//!
//! Connection parameters come from the `DB_*` environment variables or from
//! a single `DATABASE_URL`.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::errors::{ConfigError, ConfigResult};

const DEFAULT_MYSQL_PORT: u16 = 3306;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// SQL dialect behind the connection URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    MySql,
    Sqlite,
}

impl DatabaseBackend {
    /// Detect the backend from a sqlx connection URL
    pub fn from_url(url: &str) -> ConfigResult<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "mysql" | "mariadb" => Ok(DatabaseBackend::MySql),
            "sqlite" => Ok(DatabaseBackend::Sqlite),
            other => Err(ConfigError::UnsupportedBackend(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseBackend::MySql => "mysql",
            DatabaseBackend::Sqlite => "sqlite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// sqlx connection URL
    pub url: String,
    pub backend: DatabaseBackend,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Build from a URL, detecting the backend
    pub fn from_url(url: impl Into<String>) -> ConfigResult<Self> {
        let url = url.into();
        let backend = DatabaseBackend::from_url(&url)?;
        Ok(Self {
            url,
            backend,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        })
    }

    /// Private in-memory SQLite database
    pub fn sqlite_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            backend: DatabaseBackend::Sqlite,
            max_connections: 1,
        }
    }

    /// Load from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from variables supplied by `lookup`.
    ///
    /// `DATABASE_URL` wins when present. Otherwise `DB_HOST`, `DB_USERNAME`
    /// and `DB_NAME` are required, `DB_PORT` defaults to 3306 and
    /// `DB_PASSWORD` to empty.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => Self::from_url(url)?,
            None => {
                let host = require(&lookup, "DB_HOST")?;
                let username = require(&lookup, "DB_USERNAME")?;
                let name = require(&lookup, "DB_NAME")?;
                let password = lookup("DB_PASSWORD").unwrap_or_default();
                let port = match lookup("DB_PORT") {
                    Some(raw) => parse_var("DB_PORT", &raw)?,
                    None => DEFAULT_MYSQL_PORT,
                };
                Self::from_url(mysql_url(&host, port, &username, &password, &name))?
            }
        };

        if let Some(raw) = lookup("DB_MAX_CONNECTIONS") {
            let max: u32 = parse_var("DB_MAX_CONNECTIONS", &raw)?;
            if max == 0 {
                return Err(ConfigError::InvalidValue {
                    name: "DB_MAX_CONNECTIONS",
                    value: raw,
                });
            }
            config.max_connections = max;
        }

        Ok(config)
    }

    /// True when every pooled connection would open its own private database
    pub fn is_sqlite_memory(&self) -> bool {
        self.backend == DatabaseBackend::Sqlite
            && (self.url.contains(":memory:") || self.url.contains("mode=memory"))
    }

    /// URL with the password replaced, for logs
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let credentials = &self.url[scheme_end + 3..at];
                match credentials.split_once(':') {
                    Some((user, _)) => format!(
                        "{}{}:***{}",
                        &self.url[..scheme_end + 3],
                        user,
                        &self.url[at..]
                    ),
                    None => self.url.clone(),
                }
            }
            _ => self.url.clone(),
        }
    }
}

fn mysql_url(host: &str, port: u16, username: &str, password: &str, database: &str) -> String {
    format!(
        "mysql://{}:{}@{}:{}/{}",
        utf8_percent_encode(username, NON_ALPHANUMERIC),
        utf8_percent_encode(password, NON_ALPHANUMERIC),
        host,
        port,
        database
    )
}

fn require<F>(lookup: &F, name: &'static str) -> ConfigResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

pub(crate) fn parse_var<T: std::str::FromStr>(name: &'static str, raw: &str) -> ConfigResult<T> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: raw.to_string(),
    })
}
