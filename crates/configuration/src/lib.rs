use crate::error::ConfigError;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use std::env;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LogFormat, LogSettings, ServerSettings, Settings};

/// Loads the application configuration.
///
/// Sources, lowest precedence first:
/// 1. built-in defaults,
/// 2. the TOML file at `path` (or an optional `config.toml` in the working directory),
/// 3. `RESTORATION__SECTION__KEY` environment variables,
/// 4. the deployment variables `DATABASE_URL`, `DB_SCHEMA`, `DB_SCHEMA_DAPI_V1` and `API_PORT`.
///
/// A `.env` file, if present, is loaded into the environment first.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();

    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("config").required(false),
    };

    let builder = with_defaults(config::Config::builder())?
        .add_source(file)
        .add_source(Environment::with_prefix("RESTORATION").separator("__"))
        .set_override_option("database.url", env::var("DATABASE_URL").ok())?
        .set_override_option("database.schema", env::var("DB_SCHEMA").ok())?
        .set_override_option("database.api_schema", env::var("DB_SCHEMA_DAPI_V1").ok())?
        .set_override_option("server.port", env::var("API_PORT").ok())?;

    finish(builder)
}

/// Builds settings from an in-memory TOML document layered over the defaults.
/// The environment is not consulted.
pub fn load_config_from_str(toml: &str) -> Result<Settings, ConfigError> {
    let builder = with_defaults(config::Config::builder())?
        .add_source(File::from_str(toml, FileFormat::Toml));
    finish(builder)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.body_limit_bytes", 10 * 1024 * 1024)?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("database.schema", "restoration")?
        .set_default("database.api_schema", "restoration_dapi_v1")?
        .set_default("database.run_migrations", true)?
        .set_default("log.level", "info")?
        .set_default("log.format", "full")?
        .set_default("log.file_prefix", "restoration.log")
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}
