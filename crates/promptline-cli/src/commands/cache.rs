//! Snapshot cache inspection

use anyhow::Context;
use chrono::Utc;
use promptline_core::config::ContextConfig;
use promptline_core::{DirectoryCacheStore, DiskDirectoryCache};
use serde_json::json;

/// Describe the stored snapshot for `dir` as JSON
pub async fn describe(store: &DiskDirectoryCache, dir: &str) -> anyhow::Result<serde_json::Value> {
    let snapshot = store
        .load_cache(dir)
        .await
        .with_context(|| format!("Failed to read snapshot for {}", dir))?
        .with_context(|| format!("No snapshot cached for {}", dir))?;

    let valid = store.is_cache_valid(&snapshot.metadata);
    let age_ms = (Utc::now() - snapshot.metadata.updated_at)
        .num_milliseconds()
        .max(0);
    Ok(json!({
        "valid": valid,
        "ageMs": age_ms,
        "snapshot": snapshot,
    }))
}

/// Print the stored snapshot for `dir`
pub async fn show(config: &ContextConfig, dir: &str) -> anyhow::Result<()> {
    let store = DiskDirectoryCache::new(config.cache.directory.clone(), config.cache.ttl());
    let description = describe(&store, dir).await?;
    println!("{}", serde_json::to_string_pretty(&description)?);
    Ok(())
}
