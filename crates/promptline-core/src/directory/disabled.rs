//! Directories that never get a file listing

use std::path::{Path, PathBuf};

/// Denylist of directories whose contents are never listed.
///
/// The filesystem root and the user's home directory are always included;
/// listing either would be slow and rarely what the user means.
#[derive(Debug, Clone)]
pub struct DisabledDirectories {
    root: PathBuf,
    home: Option<PathBuf>,
    extra: Vec<PathBuf>,
}

impl DisabledDirectories {
    pub fn new(extra: Vec<PathBuf>) -> Self {
        Self {
            root: PathBuf::from("/"),
            home: dirs::home_dir(),
            extra,
        }
    }

    /// Reason the directory is disabled, or `None` if it may be listed
    pub fn reason_for(&self, directory: &str) -> Option<String> {
        let path = Path::new(directory);
        if path == self.root {
            return Some("File search is disabled for the root directory".to_string());
        }
        if self.home.as_deref() == Some(path) {
            return Some("File search is disabled for the home directory".to_string());
        }
        if self.extra.iter().any(|p| p == path) {
            return Some(format!("File search is disabled for {}", directory));
        }
        None
    }

    pub fn is_disabled(&self, directory: &str) -> bool {
        self.reason_for(directory).is_some()
    }
}

impl Default for DisabledDirectories {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_disabled() {
        let disabled = DisabledDirectories::default();
        assert!(disabled.is_disabled("/"));
        assert!(disabled.reason_for("/").unwrap().contains("root"));
    }

    #[test]
    fn test_home_is_disabled() {
        let disabled = DisabledDirectories::default();
        if let Some(home) = dirs::home_dir() {
            let home = home.to_string_lossy().into_owned();
            assert!(disabled.is_disabled(&home));
            assert!(disabled.is_disabled(&format!("{}/", home.trim_end_matches('/'))));
        }
    }

    #[test]
    fn test_extra_entries() {
        let disabled = DisabledDirectories::new(vec![PathBuf::from("/Volumes")]);
        assert!(disabled.is_disabled("/Volumes"));
        assert!(!disabled.is_disabled("/Volumes/work"));
    }

    #[test]
    fn test_project_directory_is_allowed() {
        let disabled = DisabledDirectories::default();
        assert!(!disabled.is_disabled("/tmp/some/project"));
    }
}
