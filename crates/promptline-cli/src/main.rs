//! Promptline CLI
//!
//! Runs the directory context pipeline outside the desktop app, for
//! debugging helpers and inspecting the snapshot cache.
//!
//! ```bash
//! promptline resolve --saved-dir ~/work/app
//! promptline cache show ~/work/app
//! promptline normalize 95 1000
//! ```
//!
//! Results go to stdout as JSON; logs go to stderr. Set `RUST_LOG=debug`
//! for verbose logging.

mod args;
mod commands;
mod router;

use args::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = router::load_config(cli.config.as_deref())?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    router::route(cli, config).await
}
