use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use thiserror::Error;
use validator::Validate;

/// Default values for configuration.
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_FILE: &str = "data/db.json";
const DEFAULT_BACKUP_DIR: &str = "data/backups";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const CONFIG_DIR: &str = "config";

/// Configuration loading/validation failures.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Configuration error: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid backup key: {0}")]
    InvalidBackupKey(String),
}

/// Application configuration with validation.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Server host address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment: "development", "staging" or "production".
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Base log level when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Path of the flat JSON data file.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Directory receiving daily backups.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,

    /// Take a daily snapshot of the data file before the first write of the day.
    #[serde(default = "default_backup_enabled")]
    pub backup_enabled: bool,

    /// Hex-encoded 32-byte key for backup integrity tags (64 hex chars).
    #[validate(length(min = 64, max = 64))]
    #[serde(default)]
    pub backup_hmac_key: Option<String>,

    /// Comma-separated list of allowed CORS origins.
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}
fn default_backup_dir() -> String {
    DEFAULT_BACKUP_DIR.to_string()
}
fn default_backup_enabled() -> bool {
    true
}
fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            data_file: default_data_file(),
            backup_dir: default_backup_dir(),
            backup_enabled: default_backup_enabled(),
            backup_hmac_key: None,
            cors_allowed_origins: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Decoded backup integrity key, when configured.
    pub fn backup_key_bytes(&self) -> Result<Option<Vec<u8>>, ConfigurationError> {
        match &self.backup_hmac_key {
            None => Ok(None),
            Some(raw) => hex::decode(raw)
                .map(Some)
                .map_err(|e| ConfigurationError::InvalidBackupKey(e.to_string())),
        }
    }
}

/// Loads configuration from optional files under `config/` plus `APP__*`
/// environment variables, then validates it.
pub fn load_config() -> Result<AppConfig, ConfigurationError> {
    let environment = env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());

    let cfg = Config::builder()
        .add_source(File::with_name(&format!("{CONFIG_DIR}/default")).required(false))
        .add_source(File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = cfg.try_deserialize()?;
    app_config.validate()?;
    // Fail startup on a malformed key instead of silently skipping backups.
    app_config.backup_key_bytes()?;
    Ok(app_config)
}

/// Initializes the tracing subscriber.
///
/// RUST_LOG wins when set; otherwise the configured level applies to this
/// crate with request tracing from tower-http.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = format!("prodtrack_api={level},tower_http=debug");
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let filter = EnvFilter::try_new(filter_directive)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
