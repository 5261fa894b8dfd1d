//! Merging and ranking of heterogeneous matches

use std::cmp::Ordering;
use std::sync::Arc;

use super::types::{AgentItem, SuggestionItem, SymbolResult};
use crate::directory::FileInfo;
use crate::score::normalize;
use crate::settings::{SettingsCache, TriggerType};

/// Default upper bound of the normalized axis
pub const DEFAULT_TARGET_MAX: f64 = 1000.0;

/// A fuzzy-matcher hit before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch<T> {
    pub item: T,
    pub raw_score: f64,
}

impl<T> ScoredMatch<T> {
    pub fn new(item: T, raw_score: f64) -> Self {
        Self { item, raw_score }
    }
}

/// Raw matches for one query, grouped by source
#[derive(Debug, Clone, Default)]
pub struct SuggestionBatch {
    pub files: Vec<ScoredMatch<FileInfo>>,
    pub agents: Vec<ScoredMatch<AgentItem>>,
    pub symbols: Vec<ScoredMatch<SymbolResult>>,
}

/// Normalized maximum per source.
///
/// Equal values treat all sources as equally relevant; raising one boosts
/// that source in the merged list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreScale {
    pub file: f64,
    pub agent: f64,
    pub symbol: f64,
}

impl Default for ScoreScale {
    fn default() -> Self {
        Self {
            file: DEFAULT_TARGET_MAX,
            agent: DEFAULT_TARGET_MAX,
            symbol: DEFAULT_TARGET_MAX,
        }
    }
}

/// Produces the final popup list.
///
/// Reads limits from the settings cache synchronously, so ranking never
/// waits on the host.
pub struct SuggestionRanker {
    settings: Arc<SettingsCache>,
    scale: ScoreScale,
}

impl SuggestionRanker {
    pub fn new(settings: Arc<SettingsCache>) -> Self {
        Self {
            settings,
            scale: ScoreScale::default(),
        }
    }

    pub fn with_scale(mut self, scale: ScoreScale) -> Self {
        self.scale = scale;
        self
    }

    /// Normalize, merge, sort and cap.
    ///
    /// Files are first cut to the file-search limit by raw score, then the
    /// merged list is cut to the trigger type's limit. Order is score
    /// descending, then files before agents before symbols, then label.
    pub fn rank(&self, kind: TriggerType, batch: SuggestionBatch) -> Vec<SuggestionItem> {
        let SuggestionBatch {
            mut files,
            agents,
            symbols,
        } = batch;

        files.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));
        files.truncate(self.settings.file_search_max_suggestions_sync());

        let mut items: Vec<SuggestionItem> =
            Vec::with_capacity(files.len() + agents.len() + symbols.len());
        items.extend(files.into_iter().map(|m| SuggestionItem::File {
            score: normalize(m.raw_score, self.scale.file),
            payload: m.item,
        }));
        items.extend(agents.into_iter().map(|m| SuggestionItem::Agent {
            score: normalize(m.raw_score, self.scale.agent),
            payload: m.item,
        }));
        items.extend(symbols.into_iter().map(|m| SuggestionItem::Symbol {
            score: normalize(m.raw_score, self.scale.symbol),
            payload: m.item,
        }));

        items.sort_by(compare_items);
        items.truncate(self.settings.max_suggestions_sync(kind));
        items
    }
}

fn compare_items(a: &SuggestionItem, b: &SuggestionItem) -> Ordering {
    b.score()
        .total_cmp(&a.score())
        .then_with(|| a.priority().cmp(&b.priority()))
        .then_with(|| a.label().cmp(b.label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContextResult;
    use crate::settings::SettingsProvider;
    use async_trait::async_trait;

    struct LimitProvider {
        mention_max: usize,
        file_max: usize,
    }

    #[async_trait]
    impl SettingsProvider for LimitProvider {
        async fn max_suggestions(&self, _kind: TriggerType) -> ContextResult<Option<usize>> {
            Ok(Some(self.mention_max))
        }

        async fn search_prefixes(&self, _kind: TriggerType) -> ContextResult<Option<Vec<String>>> {
            Ok(None)
        }

        async fn file_search_max_suggestions(&self) -> ContextResult<Option<usize>> {
            Ok(Some(self.file_max))
        }
    }

    fn agent(name: &str) -> AgentItem {
        AgentItem {
            name: name.to_string(),
            description: None,
            file_path: None,
        }
    }

    fn symbol(name: &str) -> SymbolResult {
        SymbolResult {
            name: name.to_string(),
            kind: "function".to_string(),
            file_path: "/w/lib.rs".to_string(),
            line: 10,
            container: None,
        }
    }

    fn labels(items: &[SuggestionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label()).collect()
    }

    #[test]
    fn test_merges_on_common_scale() {
        let ranker = SuggestionRanker::new(Arc::new(SettingsCache::without_provider()));
        let batch = SuggestionBatch {
            files: vec![ScoredMatch::new(FileInfo::from_path("/w/config.rs"), 95.0)],
            agents: vec![ScoredMatch::new(agent("configurator"), 150.0)],
            symbols: vec![ScoredMatch::new(symbol("config"), 30.0)],
        };

        let items = ranker.rank(TriggerType::Mention, batch);
        assert_eq!(labels(&items), vec!["configurator", "config.rs", "config"]);
        assert_eq!(items[0].score(), 1000.0);
        assert_eq!(items[1].score(), 500.0);
        assert_eq!(items[2].score(), 0.0);
    }

    #[test]
    fn test_ties_break_by_variant_then_label() {
        let ranker = SuggestionRanker::new(Arc::new(SettingsCache::without_provider()));
        let batch = SuggestionBatch {
            files: vec![
                ScoredMatch::new(FileInfo::from_path("/w/b.rs"), 200.0),
                ScoredMatch::new(FileInfo::from_path("/w/a.rs"), 200.0),
            ],
            agents: vec![ScoredMatch::new(agent("a-agent"), 200.0)],
            symbols: vec![ScoredMatch::new(symbol("a_sym"), 200.0)],
        };

        let items = ranker.rank(TriggerType::Mention, batch);
        assert_eq!(labels(&items), vec!["a.rs", "b.rs", "a-agent", "a_sym"]);
    }

    #[test]
    fn test_scale_boosts_a_source() {
        let ranker = SuggestionRanker::new(Arc::new(SettingsCache::without_provider()))
            .with_scale(ScoreScale {
                file: 1000.0,
                agent: 2000.0,
                symbol: 1000.0,
            });
        let batch = SuggestionBatch {
            files: vec![ScoredMatch::new(FileInfo::from_path("/w/x.rs"), 120.0)],
            agents: vec![ScoredMatch::new(agent("x"), 95.0)],
            ..Default::default()
        };

        let items = ranker.rank(TriggerType::Mention, batch);
        assert_eq!(labels(&items), vec!["x", "x.rs"]);
    }

    #[tokio::test]
    async fn test_limits_come_from_settings_cache() {
        let settings = Arc::new(SettingsCache::new(Arc::new(LimitProvider {
            mention_max: 3,
            file_max: 2,
        })));
        settings.preload_max_suggestions_cache().await;
        let ranker = SuggestionRanker::new(settings);

        let batch = SuggestionBatch {
            files: (0..5)
                .map(|i| ScoredMatch::new(FileInfo::from_path(format!("/w/f{}.rs", i)), 100.0 + i as f64))
                .collect(),
            agents: vec![ScoredMatch::new(agent("helper"), 41.0)],
            ..Default::default()
        };

        let items = ranker.rank(TriggerType::Mention, batch);
        assert_eq!(items.len(), 3);
        // Only the two best files survive the file cap
        assert_eq!(labels(&items), vec!["f4.rs", "f3.rs", "helper"]);
    }
}
