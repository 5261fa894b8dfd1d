//! Instant directory context from the snapshot cache

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use super::disabled::DisabledDirectories;
use super::store::DirectoryCacheStore;
use super::types::DirectoryInfo;
use crate::error::ContextResult;

/// Produces a cache-hit [`DirectoryInfo`] for the window-show fast path.
///
/// Lookup order: the saved directory (the draft's directory), then the
/// store's last-used pointer. Store failures are logged and reported as a
/// miss so the caller falls through to live detection.
pub struct DirectoryCacheLoader {
    store: Arc<dyn DirectoryCacheStore>,
    disabled: DisabledDirectories,
}

impl DirectoryCacheLoader {
    pub fn new(store: Arc<dyn DirectoryCacheStore>, disabled: DisabledDirectories) -> Self {
        Self { store, disabled }
    }

    pub fn store(&self) -> &Arc<dyn DirectoryCacheStore> {
        &self.store
    }

    pub fn disabled_directories(&self) -> &DisabledDirectories {
        &self.disabled
    }

    /// Best cached context for a window about to show. Never fails.
    #[instrument(skip(self))]
    pub async fn load_cached_files_for_window(
        &self,
        saved_directory: Option<&str>,
    ) -> Option<DirectoryInfo> {
        if let Some(saved) = saved_directory {
            if let Some(reason) = self.disabled.reason_for(saved) {
                debug!("Saved directory is disabled: {}", saved);
                return Some(DirectoryInfo::disabled(saved, reason));
            }
        }

        match self.try_load_for_window(saved_directory).await {
            Ok(info) => info,
            Err(e) => {
                error!("Failed to load directory cache: {}", e);
                None
            }
        }
    }

    /// Cache-hit result for one directory, or `None` on miss or stale entry
    pub async fn load_cache_for_directory(
        &self,
        directory: &str,
    ) -> ContextResult<Option<DirectoryInfo>> {
        let Some(snapshot) = self.store.load_cache(directory).await? else {
            debug!("No snapshot for {}", directory);
            return Ok(None);
        };
        if !self.store.is_cache_valid(&snapshot.metadata) {
            debug!("Snapshot for {} is stale", directory);
            return Ok(None);
        }
        Ok(Some(DirectoryInfo::from_snapshot(snapshot, Utc::now())))
    }

    async fn try_load_for_window(
        &self,
        saved_directory: Option<&str>,
    ) -> ContextResult<Option<DirectoryInfo>> {
        if let Some(saved) = saved_directory {
            if let Some(mut info) = self.load_cache_for_directory(saved).await? {
                info.from_draft = true;
                return Ok(Some(info));
            }
        }

        let Some(last_used) = self.store.last_used_directory().await? else {
            return Ok(None);
        };
        if saved_directory == Some(last_used.as_str()) || self.disabled.is_disabled(&last_used) {
            return Ok(None);
        }
        self.load_cache_for_directory(&last_used).await
    }
}
