//! Trigger extraction and keystroke-time gating

use std::sync::Arc;

use crate::settings::{SettingsCache, TriggerType};

/// An active trigger token under the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub kind: TriggerType,
    /// Text after the trigger character, up to the cursor
    pub query: String,
    /// Byte offset of the trigger character
    pub start: usize,
}

/// Find the trigger token ending at `cursor`.
///
/// The token starts after the last whitespace before the cursor. `@` opens a
/// mention anywhere; `/` opens a command only at the start of a line.
pub fn extract_trigger(text: &str, cursor: usize) -> Option<Trigger> {
    let cursor = cursor.min(text.len());
    if !text.is_char_boundary(cursor) {
        return None;
    }
    let before = &text[..cursor];
    let start = before
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let token = &before[start..];

    let mut chars = token.chars();
    let kind = match chars.next()? {
        c if c == TriggerType::Mention.trigger_char() => TriggerType::Mention,
        c if c == TriggerType::Command.trigger_char() => {
            let at_line_start = start == 0 || before[..start].ends_with('\n');
            if !at_line_start {
                return None;
            }
            TriggerType::Command
        }
        _ => return None,
    };

    Some(Trigger {
        kind,
        query: chars.as_str().to_string(),
        start,
    })
}

/// Where a trigger's suggestions should come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionRoute {
    /// Slash-command list
    Commands,
    /// File search over the current directory listing
    Files,
    /// Prefix-scoped search, e.g. `@agent:` or `@sym:`
    PrefixSearch { prefix: String },
}

/// Decides per keystroke whether and how to open the popup.
///
/// Only the sync tier of the settings cache is consulted, so an unwarmed
/// cache degrades to "commands off, no prefixes" rather than blocking.
pub struct SuggestionGate {
    settings: Arc<SettingsCache>,
}

impl SuggestionGate {
    pub fn new(settings: Arc<SettingsCache>) -> Self {
        Self { settings }
    }

    pub fn route(&self, trigger: &Trigger) -> Option<SuggestionRoute> {
        match trigger.kind {
            TriggerType::Command => self
                .settings
                .is_command_enabled_sync()
                .then_some(SuggestionRoute::Commands),
            TriggerType::Mention => Some(
                match self
                    .settings
                    .matching_search_prefix_sync(&trigger.query, TriggerType::Mention)
                {
                    Some(prefix) => SuggestionRoute::PrefixSearch { prefix },
                    None => SuggestionRoute::Files,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContextResult;
    use crate::settings::SettingsProvider;
    use async_trait::async_trait;

    struct PrefixProvider;

    #[async_trait]
    impl SettingsProvider for PrefixProvider {
        async fn max_suggestions(&self, _kind: TriggerType) -> ContextResult<Option<usize>> {
            Ok(None)
        }

        async fn search_prefixes(&self, kind: TriggerType) -> ContextResult<Option<Vec<String>>> {
            Ok(Some(match kind {
                TriggerType::Command => vec![],
                TriggerType::Mention => vec!["agent:".to_string()],
            }))
        }

        async fn file_search_max_suggestions(&self) -> ContextResult<Option<usize>> {
            Ok(None)
        }
    }

    #[test]
    fn test_extracts_mention_mid_line() {
        let text = "look at @src/ma";
        let trigger = extract_trigger(text, text.len()).unwrap();
        assert_eq!(trigger.kind, TriggerType::Mention);
        assert_eq!(trigger.query, "src/ma");
        assert_eq!(trigger.start, 8);
    }

    #[test]
    fn test_command_only_at_line_start() {
        assert_eq!(
            extract_trigger("/rev", 4).map(|t| t.kind),
            Some(TriggerType::Command)
        );
        assert_eq!(
            extract_trigger("first\n/rev", 10).map(|t| t.query),
            Some("rev".to_string())
        );
        assert!(extract_trigger("path a/b", 8).is_none());
        assert!(extract_trigger("run /rev", 8).is_none());
    }

    #[test]
    fn test_no_trigger_after_whitespace_or_plain_word() {
        assert!(extract_trigger("@foo ", 5).is_none());
        assert!(extract_trigger("hello", 5).is_none());
        assert!(extract_trigger("", 0).is_none());
    }

    #[test]
    fn test_cursor_is_clamped_and_must_be_on_char_boundary() {
        let trigger = extract_trigger("@ab", 99).unwrap();
        assert_eq!(trigger.query, "ab");

        let text = "@é";
        assert!(extract_trigger(text, 2).is_none());
        assert_eq!(extract_trigger(text, 3).unwrap().query, "é");
    }

    #[test]
    fn test_gate_with_cold_cache() {
        let gate = SuggestionGate::new(Arc::new(SettingsCache::without_provider()));
        let command = extract_trigger("/", 1).unwrap();
        let mention = extract_trigger("@agent:x", 8).unwrap();

        assert_eq!(gate.route(&command), None);
        assert_eq!(gate.route(&mention), Some(SuggestionRoute::Files));
    }

    #[tokio::test]
    async fn test_gate_with_warm_cache() {
        let settings = Arc::new(SettingsCache::new(Arc::new(PrefixProvider)));
        settings.preload_search_prefixes_cache().await;
        let gate = SuggestionGate::new(settings);

        let command = extract_trigger("/", 1).unwrap();
        assert_eq!(gate.route(&command), Some(SuggestionRoute::Commands));

        let scoped = extract_trigger("@agent:rev", 10).unwrap();
        assert_eq!(
            gate.route(&scoped),
            Some(SuggestionRoute::PrefixSearch {
                prefix: "agent:".to_string()
            })
        );

        let plain = extract_trigger("@main", 5).unwrap();
        assert_eq!(gate.route(&plain), Some(SuggestionRoute::Files));
    }
}
