//! File-based configuration loading

use crate::config::model::ContextConfig;
use crate::error::{ContextError, ContextResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Serialization format of an on-disk document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    /// Format named by the file extension, or `fallback` when the extension
    /// is missing or unknown.
    pub(crate) fn from_path(path: &Path, fallback: Format) -> Format {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Format::Toml,
            Some("yaml") | Some("yml") => Format::Yaml,
            Some("json") => Format::Json,
            _ => fallback,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Toml => "TOML",
            Format::Yaml => "YAML",
        }
    }
}

/// Deserialize `content` in the format chosen by `path`'s extension.
///
/// The error is a bare message; callers wrap it in their own error kind.
pub(crate) fn parse_by_extension<T: DeserializeOwned>(
    path: &Path,
    content: &str,
    fallback: Format,
) -> Result<T, String> {
    let format = Format::from_path(path, fallback);
    let parsed = match format {
        Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| format!("invalid {}: {}", format.label(), e))
}

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension; anything
/// else is read as JSON. Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> ContextResult<ContextConfig> {
    if !path.exists() {
        return Ok(ContextConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ContextError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    parse_by_extension(path, &content, Format::Json).map_err(|e| {
        ContextError::config_with_context(
            format!("Failed to parse config file: {}", e),
            format!("Deserializing configuration from '{}'", path.display()),
        )
    })
}
