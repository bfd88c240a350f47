// src/core/credential_store.rs
//! Client-local key/value persistence, the equivalent of browser local storage.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::app_log;
use crate::core::FsOps;

/// Fixed key the API key is persisted under.
pub const CREDENTIAL_KEY: &str = "openai_api_key";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Store backed by a flat TOML table of string values.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_table(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = FsOps::read_file_safe(&self.path).await?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse store: {}", self.path.display()))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_table().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut table = self.read_table().await?;
        table.insert(key.to_string(), value.to_string());

        let content = toml::to_string(&table).context("Failed to serialize store")?;
        FsOps::write_file_safe(&self.path, &content).await?;

        app_log!(info, "Stored '{}' in {}", key, self.path.display());
        Ok(())
    }
}
