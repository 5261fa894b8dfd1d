//! Settings file watcher for hot reload
//!
//! Watches the directory containing the host settings file (editors and the
//! host often replace the file atomically, which a file-level watch misses)
//! and, after a debounce, clears and re-warms the [`SettingsCache`].

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{DebouncedEvent, Debouncer, new_debouncer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, error, info};

use super::cache::SettingsCache;
use crate::config::timeouts;
use crate::error::{ContextError, ContextResult};

/// Hot-reload watcher over one settings file
pub struct SettingsWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    settings_file: PathBuf,
}

impl SettingsWatcher {
    /// Start watching `settings_file` with the default debounce.
    ///
    /// Reload work runs on `runtime`, so this can be called from any thread.
    pub fn spawn(
        settings_file: impl Into<PathBuf>,
        cache: Arc<SettingsCache>,
        runtime: Handle,
    ) -> ContextResult<Self> {
        Self::with_debounce(
            settings_file,
            cache,
            runtime,
            timeouts::settings::reload_debounce(),
        )
    }

    pub fn with_debounce(
        settings_file: impl Into<PathBuf>,
        cache: Arc<SettingsCache>,
        runtime: Handle,
        debounce: Duration,
    ) -> ContextResult<Self> {
        let settings_file = settings_file.into();
        let parent = settings_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !parent.is_dir() {
            return Err(ContextError::settings(format!(
                "Settings directory does not exist: {}",
                parent.display()
            )));
        }

        let watched_file = settings_file.clone();
        let mut debouncer = new_debouncer(
            debounce,
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    if !touches_settings_file(&events, &watched_file) {
                        return;
                    }
                    debug!("Settings file changed: {}", watched_file.display());
                    let cache = Arc::clone(&cache);
                    runtime.spawn(async move {
                        cache.clear_all_caches();
                        cache.preload_search_prefixes_cache().await;
                    });
                }
                Err(e) => {
                    error!("Settings watch error: {:?}", e);
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(&parent, RecursiveMode::NonRecursive)?;
        info!("Watching settings file: {}", settings_file.display());

        Ok(Self {
            _debouncer: debouncer,
            settings_file,
        })
    }

    pub fn settings_file(&self) -> &Path {
        &self.settings_file
    }
}

fn touches_settings_file(events: &[DebouncedEvent], settings_file: &Path) -> bool {
    let Some(file_name) = settings_file.file_name() else {
        return false;
    };
    events
        .iter()
        .any(|event| event.path.file_name() == Some(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContextResult;
    use crate::settings::file_provider::FileSettingsProvider;
    use crate::settings::provider::{SettingsProvider, TriggerType};
    use async_trait::async_trait;
    use notify_debouncer_mini::DebouncedEventKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct CountingProvider {
        prefix_calls: AtomicUsize,
    }

    #[async_trait]
    impl SettingsProvider for CountingProvider {
        async fn max_suggestions(&self, _kind: TriggerType) -> ContextResult<Option<usize>> {
            Ok(None)
        }

        async fn search_prefixes(&self, _kind: TriggerType) -> ContextResult<Option<Vec<String>>> {
            self.prefix_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(vec!["agent:".to_string()]))
        }

        async fn file_search_max_suggestions(&self) -> ContextResult<Option<usize>> {
            Ok(None)
        }
    }

    /// File-backed provider that counts prefix reads
    struct CountingFileProvider {
        inner: FileSettingsProvider,
        prefix_calls: AtomicUsize,
    }

    #[async_trait]
    impl SettingsProvider for CountingFileProvider {
        async fn max_suggestions(&self, kind: TriggerType) -> ContextResult<Option<usize>> {
            self.inner.max_suggestions(kind).await
        }

        async fn search_prefixes(&self, kind: TriggerType) -> ContextResult<Option<Vec<String>>> {
            self.prefix_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.search_prefixes(kind).await
        }

        async fn file_search_max_suggestions(&self) -> ContextResult<Option<usize>> {
            self.inner.file_search_max_suggestions().await
        }
    }

    fn event(path: &str) -> DebouncedEvent {
        DebouncedEvent {
            path: PathBuf::from(path),
            kind: DebouncedEventKind::Any,
        }
    }

    #[test]
    fn test_only_settings_file_events_count() {
        let settings = Path::new("/home/user/.promptline/settings.yml");
        assert!(touches_settings_file(
            &[event("/home/user/.promptline/settings.yml")],
            settings
        ));
        assert!(!touches_settings_file(
            &[event("/home/user/.promptline/cache.json")],
            settings
        ));
        assert!(!touches_settings_file(&[], settings));
    }

    #[tokio::test]
    async fn test_watcher_creation() {
        let dir = tempdir().unwrap();
        let provider = Arc::new(CountingProvider {
            prefix_calls: AtomicUsize::new(0),
        });
        let cache = Arc::new(SettingsCache::new(provider));

        let watcher = SettingsWatcher::spawn(
            dir.path().join("settings.yml"),
            cache,
            Handle::current(),
        )
        .unwrap();
        assert!(watcher.settings_file().ends_with("settings.yml"));
    }

    #[tokio::test]
    async fn test_missing_directory_is_error() {
        let dir = tempdir().unwrap();
        let cache = Arc::new(SettingsCache::without_provider());

        let result = SettingsWatcher::spawn(
            dir.path().join("missing").join("settings.yml"),
            cache,
            Handle::current(),
        );
        assert!(result.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_settings_edit_reloads_prefixes() {
        let dir = tempdir().unwrap();
        let settings_file = dir.path().join("settings.yml");
        std::fs::write(&settings_file, "command:\n  searchPrefixes: [\"git:\"]\n").unwrap();

        let provider = Arc::new(CountingFileProvider {
            inner: FileSettingsProvider::new(&settings_file),
            prefix_calls: AtomicUsize::new(0),
        });
        let cache = Arc::new(SettingsCache::new(provider.clone()));
        cache.preload_search_prefixes_cache().await;
        assert!(cache.matches_search_prefix_sync("git:status", TriggerType::Command));
        let warmed_calls = provider.prefix_calls.load(Ordering::SeqCst);

        let _watcher = SettingsWatcher::with_debounce(
            &settings_file,
            Arc::clone(&cache),
            Handle::current(),
            Duration::from_millis(50),
        )
        .unwrap();

        std::fs::write(&settings_file, "command:\n  searchPrefixes: [\"deploy:\"]\n").unwrap();

        let mut reloaded = false;
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if cache.matches_search_prefix_sync("deploy:prod", TriggerType::Command) {
                reloaded = true;
                break;
            }
        }

        assert!(reloaded, "settings edit was not picked up");
        assert!(provider.prefix_calls.load(Ordering::SeqCst) > warmed_calls);
        assert!(!cache.matches_search_prefix_sync("git:status", TriggerType::Command));
    }
}
