//! Directory snapshot storage

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use super::types::{CachedDirectorySnapshot, SnapshotMetadata};
use crate::error::{ContextError, ContextResult};

/// Snapshot store keyed by directory path
#[async_trait]
pub trait DirectoryCacheStore: Send + Sync {
    /// Load the snapshot for a directory, if one exists
    async fn load_cache(&self, directory: &str) -> ContextResult<Option<CachedDirectorySnapshot>>;

    /// Staleness rule owned by the store
    fn is_cache_valid(&self, metadata: &SnapshotMetadata) -> bool;

    /// Directory the user last worked in
    async fn last_used_directory(&self) -> ContextResult<Option<String>>;

    /// Replace the snapshot for `snapshot.directory`
    async fn save_cache(&self, snapshot: &CachedDirectorySnapshot) -> ContextResult<()>;

    /// Update the last-used directory pointer
    async fn set_last_used_directory(&self, directory: &str) -> ContextResult<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct LastUsedPointer {
    directory: String,
}

const LAST_USED_FILE: &str = "last-used.json";

/// JSON-file snapshot store.
///
/// One file per directory, named by the SHA-256 of the directory path, plus a
/// `last-used.json` pointer. Writes go to a temporary file that is renamed
/// into place, so readers never observe a half-written snapshot.
#[derive(Debug, Clone)]
pub struct DiskDirectoryCache {
    root: PathBuf,
    ttl: Duration,
}

impl DiskDirectoryCache {
    pub fn new(root: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            root: root.into(),
            ttl,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshot_path(&self, directory: &str) -> PathBuf {
        let digest = Sha256::digest(directory.as_bytes());
        self.root.join(format!("{:x}.json", digest))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path) -> ContextResult<Option<T>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ContextError::io_with_path(
                    format!("Failed to read cache file: {}", e),
                    path.display().to_string(),
                ));
            }
        };
        let value = serde_json::from_str(&content).map_err(|e| {
            ContextError::cache_for_directory(
                format!("Corrupt cache file: {}", e),
                path.display().to_string(),
            )
        })?;
        Ok(Some(value))
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> ContextResult<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            ContextError::io_with_path(
                format!("Failed to create cache directory: {}", e),
                self.root.display().to_string(),
            )
        })?;
        let content = serde_json::to_vec(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl DirectoryCacheStore for DiskDirectoryCache {
    async fn load_cache(&self, directory: &str) -> ContextResult<Option<CachedDirectorySnapshot>> {
        let snapshot: Option<CachedDirectorySnapshot> =
            self.read_json(&self.snapshot_path(directory)).await?;
        // A file recorded for another directory is treated as a miss
        Ok(snapshot.filter(|s| s.directory == directory))
    }

    fn is_cache_valid(&self, metadata: &SnapshotMetadata) -> bool {
        let age = Utc::now() - metadata.updated_at;
        match chrono::Duration::from_std(self.ttl) {
            Ok(ttl) => age <= ttl,
            Err(_) => true,
        }
    }

    async fn last_used_directory(&self) -> ContextResult<Option<String>> {
        let pointer: Option<LastUsedPointer> =
            self.read_json(&self.root.join(LAST_USED_FILE)).await?;
        Ok(pointer.map(|p| p.directory))
    }

    async fn save_cache(&self, snapshot: &CachedDirectorySnapshot) -> ContextResult<()> {
        let path = self.snapshot_path(&snapshot.directory);
        self.write_json(&path, snapshot).await?;
        debug!(
            "Saved snapshot for {} ({} files)",
            snapshot.directory,
            snapshot.files.len()
        );
        Ok(())
    }

    async fn set_last_used_directory(&self, directory: &str) -> ContextResult<()> {
        let pointer = LastUsedPointer {
            directory: directory.to_string(),
        };
        self.write_json(&self.root.join(LAST_USED_FILE), &pointer)
            .await
    }
}
