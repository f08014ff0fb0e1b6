use std::{fmt, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Cursor secret used when `CURSOR_SECRET` is not set. Refused in production.
pub const DEFAULT_CURSOR_SECRET: &str = "gallery-demo-cursor-secret";

/// Deployment environment, read from `ENV`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment configuration: {0}")]
    Env(#[from] envy::Error),
    #[error("CURSOR_SECRET must be set in production")]
    DefaultCursorSecret,
    #[error("TOTAL_USERS must be greater than zero")]
    EmptyDataset,
}

/// Server configuration, loaded from environment variables.
///
/// Every field has a default so the demo runs with no environment at all.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_cursor_secret")]
    pub cursor_secret: String,
    /// Artificial delay applied to cursor pagination requests
    #[serde(default = "default_cursor_latency_ms")]
    pub cursor_latency_ms: u64,
    #[serde(default = "default_total_users")]
    pub total_users: u64,
    #[serde(default = "default_bot_cache_capacity")]
    pub bot_cache_capacity: usize,
    /// Root of the pre-rendered snapshot tree
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
    /// SPA shell, manifest and `assets/`
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    /// Public base URL, advertised in robots.txt when set
    #[serde(default)]
    pub public_url: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.env.is_production() && self.cursor_secret == DEFAULT_CURSOR_SECRET {
            return Err(ConfigError::DefaultCursorSecret);
        }
        if self.total_users == 0 {
            return Err(ConfigError::EmptyDataset);
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            env: Environment::default(),
            cursor_secret: default_cursor_secret(),
            cursor_latency_ms: default_cursor_latency_ms(),
            total_users: default_total_users(),
            bot_cache_capacity: default_bot_cache_capacity(),
            snapshot_dir: default_snapshot_dir(),
            public_dir: default_public_dir(),
            public_url: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_cursor_secret() -> String {
    DEFAULT_CURSOR_SECRET.to_string()
}

const fn default_cursor_latency_ms() -> u64 {
    300
}

const fn default_total_users() -> u64 {
    gallery_data::TOTAL_USERS
}

const fn default_bot_cache_capacity() -> usize {
    1000
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("snapshots")
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}
