//! CLI commands

pub mod cache;
pub mod normalize;
pub mod resolve;
