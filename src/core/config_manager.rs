// src/core/config_manager.rs
//! Configuration: defaults, then an optional TOML file, then environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:3000";
const APP_DIR: &str = "resume-builder";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigManager {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub log_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Page origin the generation path is resolved against.
    pub origin: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub downloads_dir: PathBuf,
}

/// Shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    origin: Option<String>,
    timeout_seconds: Option<u64>,
    data_dir: Option<PathBuf>,
    downloads_dir: Option<PathBuf>,
    log_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration for the current user.
    pub fn load() -> Result<Self> {
        let file = match Self::config_file_path() {
            Some(path) if path.exists() => Self::read_file(&path)?,
            _ => ConfigFile::default(),
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn config_file_path() -> Option<PathBuf> {
        std::env::var_os("RESUME_BUILDER_CONFIG")
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml")))
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        info!("Loading configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Merge file values with environment overrides. `env` is injected so the
    /// precedence can be tested without touching the process environment.
    fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let origin = env("RESUME_BUILDER_ORIGIN")
            .or(file.origin)
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            anyhow::bail!("Origin must be an http(s) URL, got: {}", origin);
        }

        let timeout_seconds = match env("RESUME_BUILDER_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .context("RESUME_BUILDER_TIMEOUT_SECS must be a number of seconds")?,
            ),
            None => file.timeout_seconds,
        };

        let data_dir = env("RESUME_BUILDER_DATA_DIR")
            .map(PathBuf::from)
            .or(file.data_dir)
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
            .context("No data directory available; set RESUME_BUILDER_DATA_DIR")?;

        let downloads_dir = env("RESUME_BUILDER_DOWNLOADS_DIR")
            .map(PathBuf::from)
            .or(file.downloads_dir)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let log_path = env("RESUME_BUILDER_LOG")
            .map(PathBuf::from)
            .or(file.log_path)
            .unwrap_or_else(|| std::env::temp_dir().join("resume-builder.log"));

        Ok(Self {
            service: ServiceConfig {
                origin: origin.trim_end_matches('/').to_string(),
                timeout_seconds,
            },
            storage: StorageConfig {
                data_dir,
                downloads_dir,
            },
            log_path,
        })
    }
}

impl StorageConfig {
    /// File backing the persisted credential.
    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join("credentials.toml")
    }
}
