use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub email: EmailSettings,
    #[serde(default)]
    pub messaging: MessagingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long a writer waits on a locked database before the store
    /// reports a busy condition.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://bloodlink.db".to_string()
}
fn default_max_connections() -> u32 {
    10
}
fn default_busy_timeout() -> u64 {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Cap on far-tier donors notified per request.
    #[serde(default = "default_far_notify_limit")]
    pub far_notify_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            far_notify_limit: default_far_notify_limit(),
        }
    }
}

fn default_far_notify_limit() -> usize {
    5
}

/// SMTP settings. Email delivery is disabled unless `smtp_host` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            from_address: default_from_address(),
            smtp_user: None,
            smtp_password: None,
            send_timeout_secs: default_send_timeout(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}
fn default_from_address() -> String {
    "alerts@bloodlink.local".to_string()
}
fn default_send_timeout() -> u64 {
    10
}

/// Secondary messaging channel settings. Off by default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagingSettings {
    #[serde(default)]
    pub enabled: bool,
    pub webhook_url: Option<String>,
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from files and environment variables.
    ///
    /// Later sources override earlier ones:
    /// 1. Struct defaults
    /// 2. config/default.toml
    /// 3. config/local.toml (development overrides)
    /// 4. Environment variables prefixed with BLOODLINK__
    ///    (e.g. BLOODLINK__SERVER__PORT -> server.port)
    ///
    /// A bare `DATABASE_URL` is also honored for deployment convenience.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("BLOODLINK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("BLOODLINK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
