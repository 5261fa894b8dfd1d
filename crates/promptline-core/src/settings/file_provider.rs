//! File backed settings provider (YAML by default, JSON or TOML by extension)

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::provider::{SettingsProvider, TriggerType};
use crate::config::file_loader::{Format, parse_by_extension};
use crate::error::{ContextError, ContextResult};

/// Per-trigger section of the settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TriggerSection {
    max_suggestions: Option<usize>,
    search_prefixes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FileSearchSection {
    max_suggestions: Option<usize>,
}

/// Shape of the host settings file
///
/// ```yaml
/// command:
///   maxSuggestions: 20
///   searchPrefixes: ["git:"]
/// mention:
///   maxSuggestions: 50
///   searchPrefixes: ["agent:", "sym:"]
/// fileSearch:
///   maxSuggestions: 30
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SettingsDocument {
    command: Option<TriggerSection>,
    mention: Option<TriggerSection>,
    file_search: Option<FileSearchSection>,
}

impl SettingsDocument {
    fn section(&self, kind: TriggerType) -> Option<&TriggerSection> {
        match kind {
            TriggerType::Command => self.command.as_ref(),
            TriggerType::Mention => self.mention.as_ref(),
        }
    }
}

/// Reads suggestion settings from a file on every request.
///
/// The file is re-read each time so edits become visible as soon as the
/// [`SettingsCache`](super::SettingsCache) is cleared. A missing file means
/// "no values"; an unreadable or malformed file is an error.
#[derive(Debug, Clone)]
pub struct FileSettingsProvider {
    path: PathBuf,
}

impl FileSettingsProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> ContextResult<SettingsDocument> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Settings file not found: {}", self.path.display());
                return Ok(SettingsDocument::default());
            }
            Err(e) => {
                return Err(ContextError::io_with_path(
                    format!("Failed to read settings file: {}", e),
                    self.path.display().to_string(),
                ));
            }
        };

        if content.trim().is_empty() {
            return Ok(SettingsDocument::default());
        }

        parse_by_extension(&self.path, &content, Format::Yaml).map_err(|e| {
            ContextError::settings(format!(
                "Failed to parse settings file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl SettingsProvider for FileSettingsProvider {
    async fn max_suggestions(&self, kind: TriggerType) -> ContextResult<Option<usize>> {
        let document = self.load().await?;
        Ok(document.section(kind).and_then(|s| s.max_suggestions))
    }

    async fn search_prefixes(&self, kind: TriggerType) -> ContextResult<Option<Vec<String>>> {
        let document = self.load().await?;
        Ok(document
            .section(kind)
            .and_then(|s| s.search_prefixes.clone()))
    }

    async fn file_search_max_suggestions(&self) -> ContextResult<Option<usize>> {
        let document = self.load().await?;
        Ok(document.file_search.and_then(|s| s.max_suggestions))
    }
}
