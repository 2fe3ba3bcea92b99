use serde::Deserialize;

use crate::infrastructure::storage::{DocumentStoreConfig, StorageConfig};

/// Environment variable prefix, e.g. `HTTPCALLBACK__SERVER__PORT=9000`
const ENV_PREFIX: &str = "HTTPCALLBACK";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub document_store: DocumentStoreSettings,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Document store settings; the in-memory store is used unless `enabled`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentStoreSettings {
    pub enabled: bool,
    pub server_url: String,
    pub database_name: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

/// Static site served for paths no API route matches
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for DocumentStoreSettings {
    fn default() -> Self {
        let defaults = DocumentStoreConfig::default();

        Self {
            enabled: false,
            server_url: defaults.server_url,
            database_name: defaults.database_name,
            max_connections: defaults.max_connections,
            connect_timeout_secs: defaults.connect_timeout_secs,
        }
    }
}

impl DocumentStoreSettings {
    /// The one storage backend the process will run with
    pub fn storage_config(&self) -> StorageConfig {
        if !self.enabled {
            return StorageConfig::in_memory();
        }

        StorageConfig::document(
            DocumentStoreConfig::new(&self.server_url, &self.database_name)
                .with_max_connections(self.max_connections)
                .with_connect_timeout(self.connect_timeout_secs),
        )
    }
}

impl AppConfig {
    /// Loads `path` (optional TOML file) overlaid with `HTTPCALLBACK__*` variables
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
