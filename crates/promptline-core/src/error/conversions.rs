//! From trait implementations for ContextError conversions

use super::types::ContextError;

impl From<std::io::Error> for ContextError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for ContextError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<serde_yaml::Error> for ContextError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::settings(format!("Invalid YAML: {}", error))
    }
}

impl From<toml::de::Error> for ContextError {
    fn from(error: toml::de::Error) -> Self {
        Self::config(format!("Invalid TOML: {}", error))
    }
}

impl From<notify::Error> for ContextError {
    fn from(error: notify::Error) -> Self {
        Self::settings(format!("File watcher error: {}", error))
    }
}
