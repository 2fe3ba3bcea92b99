//! Application settings

mod app_config;

pub use app_config::{
    AppConfig, DocumentStoreSettings, LogFormat, LoggingConfig, ServerConfig, SiteConfig,
};
