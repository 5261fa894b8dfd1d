//! Promptline Core Library
//!
//! Resolves the directory a user is working in when the prompt window shows,
//! keeps a per-directory file snapshot cache so the first render is instant,
//! and ranks file, agent and symbol suggestions on a shared score scale.

pub mod config;
pub mod detection;
pub mod directory;
pub mod error;
pub mod score;
pub mod settings;
pub mod suggestions;
pub mod window;

// Re-export commonly used types
pub use config::{ContextConfig, FileSearchSettings, load_from_file};
pub use detection::{
    DetectionOrchestrator, DetectionOutcome, DetectionRequest, DetectionStrategy, NativeDetector,
};
pub use directory::{
    CachedDirectorySnapshot, DirectoryCacheLoader, DirectoryCacheStore, DirectoryInfo,
    DisabledDirectories, DiskDirectoryCache, FileInfo,
};
pub use error::{ContextError, ContextResult};
pub use score::normalize;
pub use settings::{FileSettingsProvider, SettingsCache, SettingsProvider, SettingsWatcher, TriggerType};
pub use suggestions::{SuggestionGate, SuggestionItem, SuggestionRanker, extract_trigger};
pub use window::{DirectorySink, WindowContext, WindowOptions, WindowShow};
