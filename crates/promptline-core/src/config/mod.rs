//! Configuration for Promptline
//!
//! Configuration is loaded from a single file (TOML, YAML or JSON, chosen by
//! extension). Every field has a default, so a missing file or a partial file
//! is always usable.

pub mod file_loader;
pub mod model;
pub mod timeouts;

pub use file_loader::load_from_file;
pub use model::{
    CacheConfig, ContextConfig, DetectionConfig, FileSearchSettings, LoggingConfig,
    promptline_home,
};
