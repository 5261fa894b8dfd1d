//! Core error types for Promptline

use thiserror::Error;

/// Result type alias for Promptline operations
pub type ContextResult<T> = Result<T, ContextError>;

/// Main error type for Promptline
#[derive(Error, Debug, Clone)]
pub enum ContextError {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// Directory cache store errors
    #[error("Cache error: {message}")]
    Cache {
        message: String,
        directory: Option<String>,
    },

    /// Host settings provider errors
    #[error("Settings error: {message}")]
    Settings { message: String },

    /// External helper process errors
    #[error("Process error: {program}: {message}")]
    Process { program: String, message: String },

    /// Operation exceeded its time budget
    #[error("Timed out after {millis}ms")]
    Timeout {
        millis: u64,
        context: Option<String>,
    },

    /// Generic error
    #[error("Error: {message}")]
    Other { message: String },
}

impl ContextError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ContextError::Config { .. } => "PROMPTLINE_CONFIG",
            ContextError::Io { .. } => "PROMPTLINE_IO",
            ContextError::Json { .. } => "PROMPTLINE_JSON",
            ContextError::Cache { .. } => "PROMPTLINE_CACHE",
            ContextError::Settings { .. } => "PROMPTLINE_SETTINGS",
            ContextError::Process { .. } => "PROMPTLINE_PROCESS",
            ContextError::Timeout { .. } => "PROMPTLINE_TIMEOUT",
            ContextError::Other { .. } => "PROMPTLINE_OTHER",
        }
    }

    /// Whether a helper ran out of its time budget
    pub fn is_timeout(&self) -> bool {
        matches!(self, ContextError::Timeout { .. })
    }

    /// Extra context attached to the error, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            ContextError::Config { context, .. } | ContextError::Timeout { context, .. } => {
                context.as_deref()
            }
            ContextError::Io { path, .. } => path.as_deref(),
            ContextError::Cache { directory, .. } => directory.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            ContextError::config("a"),
            ContextError::io("b"),
            ContextError::json("c"),
            ContextError::cache("d"),
            ContextError::settings("e"),
            ContextError::process("detect", "f"),
            ContextError::timeout(10, "list"),
            ContextError::other("g"),
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.error_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_timeout_carries_program() {
        let err = ContextError::timeout(250, "/opt/bin/list");
        assert!(err.is_timeout());
        assert!(!ContextError::process("list", "exit 1").is_timeout());
        assert_eq!(err.context(), Some("/opt/bin/list"));
        assert_eq!(err.to_string(), "Timed out after 250ms");
    }

    #[test]
    fn test_cache_error_context_is_directory() {
        let err = ContextError::cache_for_directory("unreadable", "/tmp/project");
        assert_eq!(err.context(), Some("/tmp/project"));
        assert_eq!(err.to_string(), "Cache error: unreadable");
    }
}
