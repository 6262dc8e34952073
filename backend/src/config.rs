//! Server configuration.
//!
//! Settings come from an optional TOML file and are then overridden by
//! environment variables:
//!
//! | key                | env                            | default                 |
//! |--------------------|--------------------------------|-------------------------|
//! | `host`             | `HACKATHON_ADMIN_HOST`         | `127.0.0.1`             |
//! | `port`             | `HACKATHON_ADMIN_PORT`         | `8080`                  |
//! | `database_path`    | `HACKATHON_ADMIN_DATABASE`     | `hackathon-admin.sqlite`|
//! | `open_browser`     | `HACKATHON_ADMIN_OPEN_BROWSER` | `true`                  |
//! | `json_limit_bytes` |                                | 10 MiB                  |
//!
//! The file is `HACKATHON_ADMIN_CONFIG` when set, else `./hackathon-admin.toml`
//! if it exists.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "HACKATHON_ADMIN_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "hackathon-admin.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value '{value}' for {name}")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub open_browser: bool,
    pub json_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("hackathon-admin.sqlite"),
            open_browser: true,
            json_limit_bytes: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl AppConfig {
    /// Loads the configuration of the running process.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };
        Self::from_sources(file.as_deref(), |name| std::env::var(name).ok())
    }

    /// Reads `file` (if any) and applies the overrides `env` returns.
    pub fn from_sources(
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(host) = env("HACKATHON_ADMIN_HOST") {
            config.host = host;
        }
        if let Some(port) = env("HACKATHON_ADMIN_PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "HACKATHON_ADMIN_PORT",
                value: port,
            })?;
        }
        if let Some(path) = env("HACKATHON_ADMIN_DATABASE") {
            config.database_path = PathBuf::from(path);
        }
        if let Some(flag) = env("HACKATHON_ADMIN_OPEN_BROWSER") {
            config.open_browser = parse_flag(&flag).ok_or(ConfigError::InvalidEnv {
                name: "HACKATHON_ADMIN_OPEN_BROWSER",
                value: flag,
            })?;
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
