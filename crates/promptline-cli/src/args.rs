//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "promptline")]
#[command(about = "Promptline - directory context and suggestion tooling")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (defaults to ~/.promptline/config.toml)
    #[arg(long, global = true, env = "PROMPTLINE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one window-show cycle and print each render as a JSON line
    Resolve {
        /// Directory of the saved draft, tried first in the cache
        #[arg(long)]
        saved_dir: Option<String>,

        /// Overall detection budget in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Inspect the directory snapshot cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Map a raw fuzzy-match score onto the normalized scale
    Normalize {
        /// Raw matcher score
        #[arg(allow_negative_numbers = true)]
        raw: f64,

        /// Upper bound of the normalized scale
        max: f64,
    },
}

#[derive(Subcommand, Clone)]
pub enum CacheAction {
    /// Print the stored snapshot for a directory
    Show {
        /// Absolute directory path
        dir: String,
    },
}
