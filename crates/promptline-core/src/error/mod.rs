//! Error types for Promptline
//!
//! Internal seams (cache store, settings provider, process runner) report
//! failures through [`ContextError`]. Public pipeline entry points never
//! propagate it: they log and degrade to a default, empty or cached value.

mod constructors;
mod conversions;
mod types;

pub use types::{ContextError, ContextResult};
