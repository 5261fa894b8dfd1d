//! Directory context data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One enumerated file.
///
/// Only `path` and `name` are interpreted; any other metadata the listing
/// helper emits (type, size, ...) is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Absolute path
    pub path: String,
    /// File name
    pub name: String,
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl FileInfo {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Build from an absolute path, deriving the name from its last component
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = std::path::Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        Self::new(path, name)
    }

    /// Attach one opaque metadata field
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// How the listing helper walked the directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Recursive,
}

impl SearchMode {
    /// Parse the helper's `searchMode` string
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "recursive" => Some(SearchMode::Recursive),
            _ => None,
        }
    }
}

/// Canonical result of any detection or cache path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryInfo {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(default)]
    pub files: Vec<FileInfo>,
    #[serde(default)]
    pub file_count: usize,
    /// File enumeration was truncated
    #[serde(default)]
    pub partial: bool,
    #[serde(default)]
    pub search_mode: SearchMode,
    #[serde(default)]
    pub from_cache: bool,
    /// Snapshot age in milliseconds, present iff `from_cache`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_age: Option<u64>,
    #[serde(default)]
    pub from_draft: bool,
    /// Operator-facing remediation message, e.g. a missing helper dependency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default)]
    pub files_disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_disabled_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_timed_out: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_changed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    /// File limit the listing helper applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_files: Option<usize>,
}

impl DirectoryInfo {
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

/// Metadata stored alongside a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub file_count: usize,
    #[serde(default)]
    pub search_mode: SearchMode,
    #[serde(default)]
    pub partial: bool,
}

/// Persisted file listing for one directory. Replaced wholesale, never
/// edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedDirectorySnapshot {
    pub directory: String,
    pub files: Vec<FileInfo>,
    pub metadata: SnapshotMetadata,
}

impl CachedDirectorySnapshot {
    /// Snapshot of `files` stamped with the current time
    pub fn new(directory: impl Into<String>, files: Vec<FileInfo>) -> Self {
        Self::at(directory, files, Utc::now())
    }

    /// Snapshot stamped with an explicit time
    pub fn at(directory: impl Into<String>, files: Vec<FileInfo>, updated_at: DateTime<Utc>) -> Self {
        let file_count = files.len();
        Self {
            directory: directory.into(),
            files,
            metadata: SnapshotMetadata {
                updated_at,
                file_count,
                search_mode: SearchMode::Recursive,
                partial: false,
            },
        }
    }

    /// Snapshot of a detection result's listing
    pub fn from_directory_info(info: &DirectoryInfo) -> Option<Self> {
        let directory = info.directory.clone()?;
        let mut snapshot = Self::new(directory, info.files.clone());
        snapshot.metadata.search_mode = info.search_mode;
        snapshot.metadata.partial = info.partial;
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_info_keeps_unknown_fields() {
        let raw = json!({
            "path": "/work/app/src/main.rs",
            "name": "main.rs",
            "type": "file",
            "size": 1024
        });
        let file: FileInfo = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(file.name, "main.rs");
        assert_eq!(file.metadata.get("size"), Some(&json!(1024)));
        assert_eq!(serde_json::to_value(&file).unwrap(), raw);
    }

    #[test]
    fn test_file_info_from_path() {
        let file = FileInfo::from_path("/work/app/README.md");
        assert_eq!(file.name, "README.md");
        assert_eq!(file.path, "/work/app/README.md");
    }

    #[test]
    fn test_directory_info_serializes_camel_case() {
        let info = DirectoryInfo {
            success: true,
            directory: Some("/work/app".to_string()),
            file_count: 2,
            from_cache: true,
            cache_age: Some(1500),
            ..Default::default()
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["fileCount"], json!(2));
        assert_eq!(value["fromCache"], json!(true));
        assert_eq!(value["cacheAge"], json!(1500));
        assert_eq!(value["searchMode"], json!("recursive"));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_snapshot_from_directory_info() {
        let info = DirectoryInfo {
            success: true,
            directory: Some("/work/app".to_string()),
            files: vec![FileInfo::from_path("/work/app/a.rs")],
            file_count: 1,
            partial: true,
            ..Default::default()
        };
        let snapshot = CachedDirectorySnapshot::from_directory_info(&info).unwrap();
        assert_eq!(snapshot.directory, "/work/app");
        assert_eq!(snapshot.metadata.file_count, 1);
        assert!(snapshot.metadata.partial);

        let no_directory = DirectoryInfo::default();
        assert!(CachedDirectorySnapshot::from_directory_info(&no_directory).is_none());
    }
}
