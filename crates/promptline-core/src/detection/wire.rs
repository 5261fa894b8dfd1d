//! JSON emitted by the detect and list helpers

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::directory::FileInfo;

/// `detect [--bundleId <id>]` output
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectOutput {
    pub directory: Option<String>,
    pub app_name: Option<String>,
    pub bundle_id: Option<String>,
    pub error: Option<String>,
}

/// `list <directory> ...` output
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutput {
    pub files: Option<Vec<FileInfo>>,
    pub file_count: Option<usize>,
    pub search_mode: Option<String>,
    pub file_limit_reached: Option<bool>,
    pub max_files: Option<usize>,
    pub files_error: Option<String>,
    pub fd_available: Option<bool>,
}

/// Parse helper stdout.
///
/// Helpers print a single JSON line; if anything else was printed around it,
/// the last line that parses wins.
pub fn parse_json_output<T: DeserializeOwned>(stdout: &str) -> Option<T> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }
    trimmed
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| line.starts_with('{'))
        .find_map(|line| serde_json::from_str(line).ok())
}
