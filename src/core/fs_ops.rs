// src/core/fs_ops.rs
//! File system helpers and the download saver.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::app_log;

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            app_log!(info, "Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }
}

/// Offers text to the user as a named file.
pub trait FileSaver: Send + Sync {
    /// Save `contents` under `file_name` and return where it landed.
    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf>;
}

/// Saves into a fixed directory.
///
/// Contents are staged in a temporary file next to the target and renamed
/// into place, so a failed save leaves neither a partial file nor the
/// staging file behind.
pub struct DownloadDir {
    dir: PathBuf,
}

impl DownloadDir {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl FileSaver for DownloadDir {
    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        if Path::new(file_name).file_name() != Some(OsStr::new(file_name)) {
            anyhow::bail!("Not a plain file name: {}", file_name);
        }

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let mut staged = tempfile::NamedTempFile::new_in(&self.dir)
            .context("Failed to create staging file")?;
        staged
            .write_all(contents.as_bytes())
            .context("Failed to write staging file")?;

        let target = self.dir.join(file_name);
        staged
            .persist(&target)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to save {}", target.display()))?;

        app_log!(info, "Saved {} ({} bytes)", target.display(), contents.len());
        Ok(target)
    }
}
