//! Host settings provider interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ContextResult;

/// Character class that opens a suggestion popup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    /// Slash-triggered commands
    Command,
    /// At-triggered mentions (files, agents, symbols)
    Mention,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Command => "command",
            TriggerType::Mention => "mention",
        }
    }

    /// Character the user types to open this kind of popup
    pub fn trigger_char(&self) -> char {
        match self {
            TriggerType::Command => '/',
            TriggerType::Mention => '@',
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of suggestion settings.
///
/// `Ok(None)` means the host has no value for the key; the cache then falls
/// back to its default without memoizing it.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Maximum number of suggestions for a trigger type
    async fn max_suggestions(&self, kind: TriggerType) -> ContextResult<Option<usize>>;

    /// Search prefixes for a trigger type
    async fn search_prefixes(&self, kind: TriggerType) -> ContextResult<Option<Vec<String>>>;

    /// Maximum number of file-search suggestions
    async fn file_search_max_suggestions(&self) -> ContextResult<Option<usize>>;
}
