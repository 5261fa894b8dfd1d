//! Command routing logic for CLI

use anyhow::Context;
use promptline_core::config::{ContextConfig, load_from_file, promptline_home};
use std::path::Path;

use crate::args::{CacheAction, Cli, Commands};
use crate::commands;

/// Default configuration file name under `~/.promptline`
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Load the configuration; a missing file yields defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ContextConfig> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| promptline_home().join(DEFAULT_CONFIG_FILE));
    load_from_file(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: ContextConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Resolve {
            saved_dir,
            timeout_ms,
        } => commands::resolve::execute(&config, saved_dir, timeout_ms).await,
        Commands::Cache { action } => match action {
            CacheAction::Show { dir } => commands::cache::show(&config, &dir).await,
        },
        Commands::Normalize { raw, max } => {
            println!("{}", commands::normalize::execute(raw, max));
            Ok(())
        }
    }
}
