//! Dual-tier settings cache

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::provider::{SettingsProvider, TriggerType};

/// Fallback when the provider has no max-suggestions value
pub const DEFAULT_MAX_SUGGESTIONS: usize = 20;

/// Fallback when the provider has no file-search max-suggestions value
pub const DEFAULT_FILE_SEARCH_MAX_SUGGESTIONS: usize = 20;

/// One populate gate per trigger type so concurrent first reads of the same
/// slot issue a single provider call.
#[derive(Debug, Default)]
struct SlotGates {
    command: Mutex<()>,
    mention: Mutex<()>,
}

impl SlotGates {
    fn for_kind(&self, kind: TriggerType) -> &Mutex<()> {
        match kind {
            TriggerType::Command => &self.command,
            TriggerType::Mention => &self.mention,
        }
    }
}

/// Memoizing front for a [`SettingsProvider`].
///
/// Max-suggestion values are cached only when the provider actually returns
/// one; defaults produced after a failure or an absent value are returned but
/// not stored, so the next async read retries the provider. Search prefixes
/// cache an absent value as an empty list, since "no prefixes configured" is
/// a real answer from the host.
///
/// Each clear bumps a generation counter. A fetch that was in flight when the
/// clear happened still returns its value to its caller but does not store it.
pub struct SettingsCache {
    provider: Option<Arc<dyn SettingsProvider>>,
    max_suggestions: RwLock<HashMap<TriggerType, usize>>,
    search_prefixes: RwLock<HashMap<TriggerType, Vec<String>>>,
    file_search_max: RwLock<Option<usize>>,
    max_generation: AtomicU64,
    prefix_generation: AtomicU64,
    max_gates: SlotGates,
    prefix_gates: SlotGates,
    file_search_gate: Mutex<()>,
}

impl SettingsCache {
    /// Create a cache backed by a provider
    pub fn new(provider: Arc<dyn SettingsProvider>) -> Self {
        Self::build(Some(provider))
    }

    /// Create a cache with no provider; every read yields its default
    pub fn without_provider() -> Self {
        Self::build(None)
    }

    fn build(provider: Option<Arc<dyn SettingsProvider>>) -> Self {
        Self {
            provider,
            max_suggestions: RwLock::new(HashMap::new()),
            search_prefixes: RwLock::new(HashMap::new()),
            file_search_max: RwLock::new(None),
            max_generation: AtomicU64::new(0),
            prefix_generation: AtomicU64::new(0),
            max_gates: SlotGates::default(),
            prefix_gates: SlotGates::default(),
            file_search_gate: Mutex::new(()),
        }
    }

    /// Max suggestions for a trigger type, fetching on first use
    pub async fn get_max_suggestions(&self, kind: TriggerType) -> usize {
        if let Some(value) = self.cached_max_suggestions(kind) {
            return value;
        }

        let _gate = self.max_gates.for_kind(kind).lock().await;
        if let Some(value) = self.cached_max_suggestions(kind) {
            return value;
        }

        let generation = self.max_generation.load(Ordering::SeqCst);
        match self.fetch_max_suggestions(kind).await {
            Some(value) => {
                let mut slots = self.max_suggestions.write();
                if self.max_generation.load(Ordering::SeqCst) == generation {
                    slots.insert(kind, value);
                }
                value
            }
            None => DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// File-search max suggestions, fetching on first use
    pub async fn get_file_search_max_suggestions(&self) -> usize {
        if let Some(value) = *self.file_search_max.read() {
            return value;
        }

        let _gate = self.file_search_gate.lock().await;
        if let Some(value) = *self.file_search_max.read() {
            return value;
        }

        let Some(provider) = &self.provider else {
            return DEFAULT_FILE_SEARCH_MAX_SUGGESTIONS;
        };
        let generation = self.max_generation.load(Ordering::SeqCst);
        match provider.file_search_max_suggestions().await {
            Ok(Some(value)) => {
                let mut slot = self.file_search_max.write();
                if self.max_generation.load(Ordering::SeqCst) == generation {
                    *slot = Some(value);
                }
                value
            }
            Ok(None) => {
                debug!("No file search max suggestions configured, using default");
                DEFAULT_FILE_SEARCH_MAX_SUGGESTIONS
            }
            Err(e) => {
                warn!("Failed to read file search max suggestions: {}", e);
                DEFAULT_FILE_SEARCH_MAX_SUGGESTIONS
            }
        }
    }

    /// Search prefixes for a trigger type, fetching on first use
    pub async fn get_search_prefixes(&self, kind: TriggerType) -> Vec<String> {
        if let Some(prefixes) = self.cached_search_prefixes(kind) {
            return prefixes;
        }

        let _gate = self.prefix_gates.for_kind(kind).lock().await;
        if let Some(prefixes) = self.cached_search_prefixes(kind) {
            return prefixes;
        }

        let Some(provider) = &self.provider else {
            return Vec::new();
        };
        let generation = self.prefix_generation.load(Ordering::SeqCst);
        let prefixes = match provider.search_prefixes(kind).await {
            Ok(Some(prefixes)) => prefixes,
            Ok(None) => {
                debug!("No {} search prefixes configured", kind);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read {} search prefixes: {}", kind, e);
                return Vec::new();
            }
        };

        let mut slots = self.search_prefixes.write();
        if self.prefix_generation.load(Ordering::SeqCst) == generation {
            slots.insert(kind, prefixes.clone());
        }
        prefixes
    }

    /// Whether any search prefix for `kind` is a literal prefix of `query`
    pub async fn matches_search_prefix(&self, query: &str, kind: TriggerType) -> bool {
        self.get_search_prefixes(kind)
            .await
            .iter()
            .any(|prefix| query.starts_with(prefix.as_str()))
    }

    /// Cache-only check that command suggestions are available.
    ///
    /// True once the host has answered the command prefix query, even with no
    /// prefixes; false before the first preload or after a failed one.
    pub fn is_command_enabled_sync(&self) -> bool {
        self.search_prefixes
            .read()
            .contains_key(&TriggerType::Command)
    }

    /// Cache-only prefix match; false if the slot was never populated
    pub fn matches_search_prefix_sync(&self, query: &str, kind: TriggerType) -> bool {
        self.matching_search_prefix_sync(query, kind).is_some()
    }

    /// Cache-only lookup of the first prefix that matches `query`
    pub fn matching_search_prefix_sync(&self, query: &str, kind: TriggerType) -> Option<String> {
        self.search_prefixes
            .read()
            .get(&kind)?
            .iter()
            .find(|prefix| query.starts_with(prefix.as_str()))
            .cloned()
    }

    /// Cache-only max suggestions, default when never populated
    pub fn max_suggestions_sync(&self, kind: TriggerType) -> usize {
        self.cached_max_suggestions(kind)
            .unwrap_or(DEFAULT_MAX_SUGGESTIONS)
    }

    /// Cache-only file-search max suggestions, default when never populated
    pub fn file_search_max_suggestions_sync(&self) -> usize {
        self.file_search_max
            .read()
            .unwrap_or(DEFAULT_FILE_SEARCH_MAX_SUGGESTIONS)
    }

    /// Populate both prefix slots concurrently. Never fails.
    pub async fn preload_search_prefixes_cache(&self) {
        let (commands, mentions) = tokio::join!(
            self.get_search_prefixes(TriggerType::Command),
            self.get_search_prefixes(TriggerType::Mention),
        );
        debug!(
            "Preloaded search prefixes: {} command, {} mention",
            commands.len(),
            mentions.len()
        );
    }

    /// Populate both max-suggestion slots and the file-search slot. Never fails.
    pub async fn preload_max_suggestions_cache(&self) {
        let (commands, mentions, files) = tokio::join!(
            self.get_max_suggestions(TriggerType::Command),
            self.get_max_suggestions(TriggerType::Mention),
            self.get_file_search_max_suggestions(),
        );
        debug!(
            "Preloaded max suggestions: command={}, mention={}, files={}",
            commands, mentions, files
        );
    }

    pub fn clear_max_suggestions_cache(&self) {
        let mut slots = self.max_suggestions.write();
        let mut file_slot = self.file_search_max.write();
        self.max_generation.fetch_add(1, Ordering::SeqCst);
        slots.clear();
        *file_slot = None;
    }

    pub fn clear_search_prefixes_cache(&self) {
        let mut slots = self.search_prefixes.write();
        self.prefix_generation.fetch_add(1, Ordering::SeqCst);
        slots.clear();
    }

    pub fn clear_all_caches(&self) {
        self.clear_max_suggestions_cache();
        self.clear_search_prefixes_cache();
        debug!("Settings caches cleared");
    }

    fn cached_max_suggestions(&self, kind: TriggerType) -> Option<usize> {
        self.max_suggestions.read().get(&kind).copied()
    }

    fn cached_search_prefixes(&self, kind: TriggerType) -> Option<Vec<String>> {
        self.search_prefixes.read().get(&kind).cloned()
    }

    async fn fetch_max_suggestions(&self, kind: TriggerType) -> Option<usize> {
        let provider = self.provider.as_ref()?;
        match provider.max_suggestions(kind).await {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                debug!("No {} max suggestions configured, using default", kind);
                None
            }
            Err(e) => {
                warn!("Failed to read {} max suggestions: {}", kind, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for SettingsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsCache")
            .field("has_provider", &self.provider.is_some())
            .field("max_suggestions", &*self.max_suggestions.read())
            .field("search_prefixes", &*self.search_prefixes.read())
            .field("file_search_max", &*self.file_search_max.read())
            .finish()
    }
}
