//! Window-show coordinator
//!
//! Ties the pieces together for one "window about to show" event: warm the
//! settings cache, render the cached directory context immediately, then run
//! live detection in the background and re-render only if it found something
//! different.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::config::{FileSearchSettings, timeouts};
use crate::detection::{DetectionOrchestrator, DetectionOutcome, DetectionRequest};
use crate::directory::{
    CachedDirectorySnapshot, DirectoryCacheLoader, DirectoryInfo, has_file_list_changes,
};
use crate::settings::SettingsCache;

/// Receives directory renders for the UI
pub trait DirectorySink: Send + Sync {
    /// Display a directory context. Called at most twice per window show.
    fn render(&self, info: &DirectoryInfo);
}

/// A sink that drops every render
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDirectorySink;

impl DirectorySink for NoopDirectorySink {
    fn render(&self, _info: &DirectoryInfo) {}
}

/// Tunables for the background detection
#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub timeout: Duration,
    pub file_search: FileSearchSettings,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            timeout: timeouts::detection::overall_timeout(),
            file_search: FileSearchSettings::default(),
        }
    }
}

/// Handle for one window show
#[derive(Debug)]
pub struct WindowShow {
    /// Cached context rendered before detection started
    pub instant: Option<DirectoryInfo>,
    /// Background detection result
    pub fresh: JoinHandle<Option<DirectoryInfo>>,
}

impl WindowShow {
    /// Wait for the background detection
    pub async fn wait_fresh(self) -> Option<DirectoryInfo> {
        match self.fresh.await {
            Ok(info) => info,
            Err(e) => {
                error!("Background detection task failed: {}", e);
                None
            }
        }
    }
}

struct WindowInner {
    settings: Arc<SettingsCache>,
    loader: DirectoryCacheLoader,
    orchestrator: DetectionOrchestrator,
    options: WindowOptions,
    last_bundle_id: Mutex<Option<String>>,
    last_directory: Mutex<Option<String>>,
}

/// Shared state across window shows. Cheap to clone.
#[derive(Clone)]
pub struct WindowContext {
    inner: Arc<WindowInner>,
}

impl WindowContext {
    pub fn new(
        settings: Arc<SettingsCache>,
        loader: DirectoryCacheLoader,
        orchestrator: DetectionOrchestrator,
        options: WindowOptions,
    ) -> Self {
        Self {
            inner: Arc::new(WindowInner {
                settings,
                loader,
                orchestrator,
                options,
                last_bundle_id: Mutex::new(None),
                last_directory: Mutex::new(None),
            }),
        }
    }

    pub fn settings(&self) -> &Arc<SettingsCache> {
        &self.inner.settings
    }

    /// Bundle identifier remembered from the last successful detection
    pub fn last_bundle_id(&self) -> Option<String> {
        self.inner.last_bundle_id.lock().clone()
    }

    /// Handle one window show.
    ///
    /// The cached result (if any) is rendered before this returns; live
    /// detection continues on the returned handle. Must be called within a
    /// tokio runtime.
    #[instrument(skip_all, fields(saved_directory = ?saved_directory))]
    pub async fn on_window_show(
        &self,
        saved_directory: Option<String>,
        sink: Arc<dyn DirectorySink>,
    ) -> WindowShow {
        let settings = Arc::clone(&self.inner.settings);
        tokio::spawn(async move {
            tokio::join!(
                settings.preload_search_prefixes_cache(),
                settings.preload_max_suggestions_cache(),
            );
        });

        let instant = self
            .inner
            .loader
            .load_cached_files_for_window(saved_directory.as_deref())
            .await;
        if let Some(info) = &instant {
            debug!(
                "Rendering cached context for {:?} ({} files)",
                info.directory,
                info.files.len()
            );
            sink.render(info);
        }

        let inner = Arc::clone(&self.inner);
        let cached = instant.clone();
        let fresh = tokio::spawn(async move { inner.refresh(cached, sink).await });

        WindowShow { instant, fresh }
    }
}

impl WindowInner {
    async fn refresh(
        &self,
        instant: Option<DirectoryInfo>,
        sink: Arc<dyn DirectorySink>,
    ) -> Option<DirectoryInfo> {
        let request = DetectionRequest::new(self.options.timeout)
            .with_previous_bundle_id(self.last_bundle_id.lock().clone())
            .with_file_search(self.options.file_search.clone());
        let previous_directory = instant
            .as_ref()
            .and_then(|i| i.directory.clone())
            .or_else(|| self.last_directory.lock().clone());

        match self.orchestrator.detect(&request).await {
            DetectionOutcome::Detected(info) => {
                let info = keep_cached_listing(
                    instant.as_ref(),
                    info.with_change_flags(previous_directory.as_deref()),
                );
                self.remember(&info);
                self.persist(&info).await;
                if needs_rerender(instant.as_ref(), &info) {
                    sink.render(&info);
                } else {
                    debug!("Fresh detection matches cached context");
                }
                Some(info)
            }
            DetectionOutcome::Reported(info) => {
                if instant.is_none() {
                    sink.render(&info);
                }
                Some(info)
            }
            DetectionOutcome::TimedOut => {
                warn!("Directory detection timed out after {:?}", self.options.timeout);
                let info = DirectoryInfo::timed_out(previous_directory.as_deref());
                if instant.is_none() {
                    sink.render(&info);
                }
                Some(info)
            }
            outcome => {
                debug!("No fresh directory context: {}", outcome.label());
                None
            }
        }
    }

    fn remember(&self, info: &DirectoryInfo) {
        if let Some(bundle_id) = &info.bundle_id {
            *self.last_bundle_id.lock() = Some(bundle_id.clone());
        }
        if let Some(directory) = &info.directory {
            *self.last_directory.lock() = Some(directory.clone());
        }
    }

    /// Write the snapshot when the listing changed or the stored one expired,
    /// then move the last-used pointer. A listing carried over from the cache
    /// is never written back. Store failures are logged only.
    #[instrument(skip_all, fields(directory = ?info.directory))]
    async fn persist(&self, info: &DirectoryInfo) {
        if info.files_disabled || !info.has_files() {
            return;
        }
        let Some(directory) = info.directory.as_deref() else {
            return;
        };
        if !info.from_cache {
            self.save_snapshot(info).await;
        }
        if let Err(e) = self.loader.store().set_last_used_directory(directory).await {
            error!("Failed to update last-used directory: {}", e);
        }
    }

    async fn save_snapshot(&self, info: &DirectoryInfo) {
        let Some(snapshot) = CachedDirectorySnapshot::from_directory_info(info) else {
            return;
        };
        let store = self.loader.store();

        let stored = match store.load_cache(&snapshot.directory).await {
            Ok(stored) => stored,
            Err(e) => {
                error!("Failed to read snapshot before write: {}", e);
                None
            }
        };
        let changed = has_file_list_changes(stored.as_ref().map(|s| s.files.as_slice()), &info.files);
        let expired = stored
            .as_ref()
            .is_some_and(|s| !store.is_cache_valid(&s.metadata));

        if changed || expired {
            match store.save_cache(&snapshot).await {
                Ok(()) => info!(
                    "Cached {} files for {}",
                    snapshot.files.len(),
                    snapshot.directory
                ),
                Err(e) => error!("Failed to save snapshot: {}", e),
            }
        }
    }
}

/// Keep the on-screen listing when detection confirmed the same directory
/// but produced no files (list helper timed out or failed).
///
/// The detect stage still contributes the app, the bundle id and any hint.
fn keep_cached_listing(instant: Option<&DirectoryInfo>, mut fresh: DirectoryInfo) -> DirectoryInfo {
    let Some(instant) = instant else {
        return fresh;
    };
    if fresh.files_disabled
        || fresh.has_files()
        || !instant.has_files()
        || instant.directory != fresh.directory
    {
        return fresh;
    }
    debug!("No fresh listing, keeping {} cached files", instant.files.len());
    fresh.files = instant.files.clone();
    fresh.file_count = instant.file_count;
    fresh.partial = instant.partial;
    fresh.search_mode = instant.search_mode;
    fresh.max_files = instant.max_files;
    fresh.from_cache = true;
    fresh.cache_age = instant.cache_age;
    fresh
}

/// Whether a fresh result differs from what is already on screen
fn needs_rerender(instant: Option<&DirectoryInfo>, fresh: &DirectoryInfo) -> bool {
    let Some(instant) = instant else {
        return true;
    };
    instant.directory != fresh.directory
        || instant.files_disabled != fresh.files_disabled
        || instant.hint != fresh.hint
        || has_file_list_changes(Some(&instant.files), &fresh.files)
}
