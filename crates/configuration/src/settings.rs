use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

/// Where and how the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit_bytes: usize,
}

/// Connection pool and schema targeting.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Falls back to the `DATABASE_URL` environment variable when unset.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// The internal schema that owns the tables (`DB_SCHEMA`).
    pub schema: String,
    /// The API-facing schema holding the compatibility views (`DB_SCHEMA_DAPI_V1`).
    pub api_schema: String,
    /// Apply pending migrations when the server starts.
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// An `EnvFilter` directive such as `info` or `web_server=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::ValidationError(format!("invalid server address {}:{}", self.host, self.port)))
    }
}

impl Settings {
    /// Checks invariants that deserialization alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;

        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.database.schema.is_empty() || self.database.api_schema.is_empty() {
            return Err(ConfigError::ValidationError(
                "database.schema and database.api_schema must not be empty".to_string(),
            ));
        }
        if self.database.schema == self.database.api_schema {
            return Err(ConfigError::ValidationError(format!(
                "database.api_schema must differ from database.schema ('{}')",
                self.database.schema
            )));
        }
        Ok(())
    }
}
