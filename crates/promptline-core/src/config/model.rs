//! Configuration model

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::timeouts;

/// Base directory for Promptline state (`~/.promptline`)
pub fn promptline_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".promptline")
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// External detection helpers and their time budgets
    pub detection: DetectionConfig,
    /// Directory snapshot cache
    pub cache: CacheConfig,
    /// Options forwarded to the listing helper
    pub file_search: FileSearchSettings,
    /// Host settings file (suggestion counts, search prefixes)
    pub settings_file: PathBuf,
    /// Logging options
    pub logging: LoggingConfig,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            cache: CacheConfig::default(),
            file_search: FileSearchSettings::default(),
            settings_file: promptline_home().join("settings.yml"),
            logging: LoggingConfig::default(),
        }
    }
}

/// Detection helper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Helper that reports the frontmost application and its directory
    pub detect_binary: PathBuf,
    /// Helper that enumerates files in a directory
    pub list_binary: PathBuf,
    /// Overall budget for one detection attempt, in milliseconds
    pub timeout_ms: u64,
    /// Cap for the detect stage alone, in milliseconds
    pub stage_cap_ms: u64,
    /// Minimum budget for the listing stage, in milliseconds
    pub stage2_floor_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        let bin = promptline_home().join("bin");
        Self {
            detect_binary: bin.join("directory-detector"),
            list_binary: bin.join("file-lister"),
            timeout_ms: timeouts::detection::OVERALL_MS,
            stage_cap_ms: timeouts::detection::STAGE_CAP_MS,
            stage2_floor_ms: timeouts::detection::STAGE2_FLOOR_MS,
        }
    }
}

impl DetectionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn stage_cap(&self) -> Duration {
        Duration::from_millis(self.stage_cap_ms)
    }

    pub fn stage2_floor(&self) -> Duration {
        Duration::from_millis(self.stage2_floor_ms)
    }
}

/// Directory snapshot cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Where snapshots are stored
    pub directory: PathBuf,
    /// Maximum snapshot age in seconds
    pub ttl_secs: u64,
    /// Directories that never get a file listing, in addition to `/` and home
    pub disabled_directories: Vec<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: promptline_home().join("cache").join("projects"),
            ttl_secs: timeouts::cache::TTL_SECS,
            disabled_directories: Vec::new(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// File search options forwarded to the listing helper.
///
/// `None` and empty lists leave the helper's own default in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchSettings {
    pub respect_gitignore: Option<bool>,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub max_files: Option<usize>,
    pub include_hidden: Option<bool>,
    pub max_depth: Option<usize>,
    pub follow_symlinks: Option<bool>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_detection_budgets() {
        let config = ContextConfig::default();
        assert_eq!(config.detection.timeout(), Duration::from_millis(5_000));
        assert_eq!(config.detection.stage_cap(), Duration::from_millis(3_000));
        assert_eq!(config.detection.stage2_floor(), Duration::from_millis(1_000));
    }

    #[test]
    fn test_default_paths_live_under_home() {
        let config = ContextConfig::default();
        let home = promptline_home();
        assert!(config.cache.directory.starts_with(&home));
        assert!(config.settings_file.starts_with(&home));
        assert!(config.detection.detect_binary.starts_with(&home));
    }

    #[test]
    fn test_file_search_defaults_are_unset() {
        let settings = FileSearchSettings::default();
        assert!(settings.respect_gitignore.is_none());
        assert!(settings.include_patterns.is_empty());
        assert!(settings.max_files.is_none());
    }
}
