//! Directory context: result types, snapshot cache and cache loader
//!
//! Every path that resolves "where the user is working" (live detection,
//! cache hit, timeout, denylisted directory) produces the same
//! [`DirectoryInfo`] shape, built through the constructors in [`builder`].

pub mod builder;
pub mod disabled;
pub mod loader;
pub mod store;
pub mod types;

pub use builder::has_file_list_changes;
pub use disabled::DisabledDirectories;
pub use loader::DirectoryCacheLoader;
pub use store::{DirectoryCacheStore, DiskDirectoryCache};
pub use types::{CachedDirectorySnapshot, DirectoryInfo, FileInfo, SearchMode, SnapshotMetadata};
