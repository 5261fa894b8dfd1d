//! Constructors for [`DirectoryInfo`]
//!
//! All result shapes are built here so invariants hold everywhere:
//! a disabled directory never carries files, a cache hit always carries a
//! non-negative age, and the change flag is only set for a real change.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use super::types::{CachedDirectorySnapshot, DirectoryInfo, FileInfo};

impl DirectoryInfo {
    /// Sentinel for a denylisted directory (root, home, ...)
    pub fn disabled(directory: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            success: true,
            directory: Some(directory.into()),
            files: Vec::new(),
            file_count: 0,
            files_disabled: true,
            files_disabled_reason: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Cache-hit result; `cache_age` is `now - updated_at`, floored at zero
    pub fn from_snapshot(snapshot: CachedDirectorySnapshot, now: DateTime<Utc>) -> Self {
        let age_ms = (now - snapshot.metadata.updated_at).num_milliseconds().max(0) as u64;
        let file_count = snapshot.files.len();
        Self {
            success: true,
            directory: Some(snapshot.directory),
            files: snapshot.files,
            file_count,
            partial: snapshot.metadata.partial,
            search_mode: snapshot.metadata.search_mode,
            from_cache: true,
            cache_age: Some(age_ms),
            ..Default::default()
        }
    }

    /// Stage-one result: the directory is known, files are not yet listed
    pub fn detected(
        directory: impl Into<String>,
        app_name: Option<String>,
        bundle_id: Option<String>,
    ) -> Self {
        Self {
            success: true,
            directory: Some(directory.into()),
            app_name,
            bundle_id,
            ..Default::default()
        }
    }

    /// Detection ran out of time; keeps the last good directory if known
    pub fn timed_out(last_directory: Option<&str>) -> Self {
        Self {
            success: false,
            directory: last_directory.map(str::to_string),
            detection_timed_out: Some(true),
            error: Some("Directory detection timed out".to_string()),
            ..Default::default()
        }
    }

    /// Error result carrying a diagnostic message
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Mark the result as changed relative to `previous_directory`.
    ///
    /// Flags are only set when a previous directory is known and differs.
    pub fn with_change_flags(mut self, previous_directory: Option<&str>) -> Self {
        if let (Some(previous), Some(current)) = (previous_directory, self.directory.as_deref()) {
            if previous != current {
                self.directory_changed = Some(true);
                self.previous_directory = Some(previous.to_string());
            }
        }
        self
    }
}

/// Whether two file listings differ as sets of paths.
///
/// Ordering and non-path metadata are ignored. A missing old listing always
/// counts as a change.
pub fn has_file_list_changes(old_files: Option<&[FileInfo]>, new_files: &[FileInfo]) -> bool {
    let Some(old_files) = old_files else {
        return true;
    };
    let old_paths: HashSet<&str> = old_files.iter().map(|f| f.path.as_str()).collect();
    let new_paths: HashSet<&str> = new_files.iter().map(|f| f.path.as_str()).collect();
    old_paths != new_paths
}
