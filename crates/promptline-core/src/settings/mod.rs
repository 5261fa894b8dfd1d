//! Suggestion settings
//!
//! Small, rarely-changing values owned by the host (per-trigger maximum
//! suggestion counts and search prefixes) are read through a
//! [`SettingsProvider`] and memoized by [`SettingsCache`]. The cache has two
//! access tiers:
//!
//! - **async**: cache-or-fetch, used at safe points such as window show
//! - **sync**: cache-only, used on every keystroke and never blocks
//!
//! [`SettingsWatcher`] clears and re-warms the cache when the host settings
//! file changes on disk.

pub mod cache;
pub mod file_provider;
pub mod provider;
pub mod watcher;

pub use cache::{DEFAULT_FILE_SEARCH_MAX_SUGGESTIONS, DEFAULT_MAX_SUGGESTIONS, SettingsCache};
pub use file_provider::FileSettingsProvider;
pub use provider::{SettingsProvider, TriggerType};
pub use watcher::SettingsWatcher;
