use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Which event store variant the application runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Volatile, process-local store. Mostly useful for tests and demos.
    Memory,
    /// JSON document on the local filesystem.
    Local,
    /// Another lazycal instance reached over HTTP.
    Remote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// File backing the `local` backend.
    pub path: String,
    /// Base origin of the server backing the `remote` backend.
    pub url: Option<String>,
}

impl StorageConfig {
    /// ## Summary
    /// Checks that the selected backend has everything it needs.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the `remote` backend has no URL or
    /// the `local` backend has an empty path.
    pub fn validate(&self) -> CoreResult<()> {
        match self.backend {
            StorageBackend::Remote if self.url.as_deref().is_none_or(str::is_empty) => Err(
                CoreError::ConfigError("storage.url is required for the remote backend".into()),
            ),
            StorageBackend::Local if self.path.trim().is_empty() => Err(CoreError::ConfigError(
                "storage.path is required for the local backend".into(),
            )),
            StorageBackend::Memory | StorageBackend::Local | StorageBackend::Remote => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the storage section fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("storage.backend", "local")?
            .set_default("storage.path", "lazycal-events.json")?
            .set_default("logging.level", "debug")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.storage.validate()?;
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
