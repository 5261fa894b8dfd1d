//! Suggestion data model

use serde::{Deserialize, Serialize};

use crate::directory::FileInfo;

/// A saved agent definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// A code symbol found by the symbol searcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolResult {
    pub name: String,
    /// function, struct, class, ...
    pub kind: String,
    pub file_path: String,
    pub line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

/// One rankable popup entry; `score` is on the shared normalized axis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SuggestionItem {
    File { payload: FileInfo, score: f64 },
    Agent { payload: AgentItem, score: f64 },
    Symbol { payload: SymbolResult, score: f64 },
}

impl SuggestionItem {
    pub fn score(&self) -> f64 {
        match self {
            SuggestionItem::File { score, .. }
            | SuggestionItem::Agent { score, .. }
            | SuggestionItem::Symbol { score, .. } => *score,
        }
    }

    /// Text shown in the popup
    pub fn label(&self) -> &str {
        match self {
            SuggestionItem::File { payload, .. } => &payload.name,
            SuggestionItem::Agent { payload, .. } => &payload.name,
            SuggestionItem::Symbol { payload, .. } => &payload.name,
        }
    }

    /// Tie-break order between variants with equal scores (lower first)
    pub fn priority(&self) -> u8 {
        match self {
            SuggestionItem::File { .. } => 0,
            SuggestionItem::Agent { .. } => 1,
            SuggestionItem::Symbol { .. } => 2,
        }
    }
}
