//! One window-show cycle from the command line

use promptline_core::config::ContextConfig;
use promptline_core::{
    DetectionOrchestrator, DirectoryCacheLoader, DirectoryInfo, DirectorySink,
    DisabledDirectories, DiskDirectoryCache, FileSettingsProvider, NativeDetector, SettingsCache,
    WindowContext, WindowOptions,
};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Writes each render to stdout as one JSON line
struct JsonLinesSink;

impl DirectorySink for JsonLinesSink {
    fn render(&self, info: &DirectoryInfo) {
        match serde_json::to_string(info) {
            Ok(line) => {
                let mut stdout = std::io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
                    error!("Failed to write render: {}", e);
                }
            }
            Err(e) => error!("Failed to serialize render: {}", e),
        }
    }
}

/// Build the window context from configuration
pub fn build_context(config: &ContextConfig, timeout_ms: Option<u64>) -> WindowContext {
    let settings = Arc::new(SettingsCache::new(Arc::new(FileSettingsProvider::new(
        config.settings_file.clone(),
    ))));
    let disabled = DisabledDirectories::new(config.cache.disabled_directories.clone());
    let store = Arc::new(DiskDirectoryCache::new(
        config.cache.directory.clone(),
        config.cache.ttl(),
    ));
    let detector =
        NativeDetector::new(&config.detection).with_disabled_directories(disabled.clone());
    let orchestrator = DetectionOrchestrator::new().with_strategy(Arc::new(detector));

    let options = WindowOptions {
        timeout: timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| config.detection.timeout()),
        file_search: config.file_search.clone(),
    };

    WindowContext::new(
        settings,
        DirectoryCacheLoader::new(store, disabled),
        orchestrator,
        options,
    )
}

/// Render the cached context, then the fresh one if it differs
pub async fn execute(
    config: &ContextConfig,
    saved_dir: Option<String>,
    timeout_ms: Option<u64>,
) -> anyhow::Result<()> {
    let context = build_context(config, timeout_ms);
    let show = context
        .on_window_show(saved_dir, Arc::new(JsonLinesSink))
        .await;

    if show.instant.is_none() {
        info!("No cached context, waiting for detection");
    }
    match show.wait_fresh().await {
        Some(fresh) => info!(
            "Detection finished: {:?} ({} files)",
            fresh.directory, fresh.file_count
        ),
        None => info!("Detection produced no directory"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_context_uses_configured_settings() {
        let temp = TempDir::new().unwrap();
        let mut config = ContextConfig::default();
        config.settings_file = temp.path().join("settings.yml");
        config.cache.directory = temp.path().join("cache");

        let context = build_context(&config, Some(100));
        assert_eq!(context.settings().max_suggestions_sync(promptline_core::TriggerType::Mention), 20);
        assert!(context.last_bundle_id().is_none());
    }
}
