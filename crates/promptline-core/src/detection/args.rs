//! Command-line arguments for the helper processes

use crate::config::FileSearchSettings;

/// Arguments for the detect helper
pub fn detect_args(previous_bundle_id: Option<&str>) -> Vec<String> {
    match previous_bundle_id {
        Some(bundle_id) if !bundle_id.is_empty() => {
            vec!["--bundleId".to_string(), bundle_id.to_string()]
        }
        _ => Vec::new(),
    }
}

/// Arguments for the list helper.
///
/// Each setting that is present maps to one flag; absent settings are left
/// to the helper's defaults.
pub fn list_args(directory: &str, settings: &FileSearchSettings) -> Vec<String> {
    let mut args = vec![directory.to_string()];

    if settings.respect_gitignore == Some(false) {
        args.push("--no-gitignore".to_string());
    }
    for pattern in &settings.exclude_patterns {
        args.push("--exclude".to_string());
        args.push(pattern.clone());
    }
    for pattern in &settings.include_patterns {
        args.push("--include".to_string());
        args.push(pattern.clone());
    }
    if let Some(max_files) = settings.max_files {
        args.push("--max-files".to_string());
        args.push(max_files.to_string());
    }
    if settings.include_hidden == Some(true) {
        args.push("--include-hidden".to_string());
    }
    if let Some(max_depth) = settings.max_depth {
        args.push("--max-depth".to_string());
        args.push(max_depth.to_string());
    }
    if settings.follow_symlinks == Some(true) {
        args.push("--follow-symlinks".to_string());
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_args() {
        assert!(detect_args(None).is_empty());
        assert!(detect_args(Some("")).is_empty());
        assert_eq!(
            detect_args(Some("com.googlecode.iterm2")),
            vec!["--bundleId", "com.googlecode.iterm2"]
        );
    }

    #[test]
    fn test_default_settings_only_pass_directory() {
        assert_eq!(
            list_args("/work/app", &FileSearchSettings::default()),
            vec!["/work/app"]
        );
    }

    #[test]
    fn test_all_settings_map_to_flags() {
        let settings = FileSearchSettings {
            respect_gitignore: Some(false),
            include_patterns: vec!["*.rs".to_string()],
            exclude_patterns: vec!["target".to_string(), "*.lock".to_string()],
            max_files: Some(5000),
            include_hidden: Some(true),
            max_depth: Some(4),
            follow_symlinks: Some(true),
        };
        assert_eq!(
            list_args("/work/app", &settings),
            vec![
                "/work/app",
                "--no-gitignore",
                "--exclude",
                "target",
                "--exclude",
                "*.lock",
                "--include",
                "*.rs",
                "--max-files",
                "5000",
                "--include-hidden",
                "--max-depth",
                "4",
                "--follow-symlinks",
            ]
        );
    }

    #[test]
    fn test_explicit_defaults_emit_no_flags() {
        let settings = FileSearchSettings {
            respect_gitignore: Some(true),
            include_hidden: Some(false),
            follow_symlinks: Some(false),
            ..Default::default()
        };
        assert_eq!(list_args("/work/app", &settings), vec!["/work/app"]);
    }
}
