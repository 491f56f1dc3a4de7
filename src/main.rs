//! resume-cache - A bounded index of recently edited resumes
//!
//! resume-cache provides:
//! - A most-recently-added list of resume references (id, name, timestamp)
//! - File-backed persistence under a single storage key
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod cache;
mod cli;
mod config;
mod core;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    cli::run(cli)
}

/// Log to stderr; `RUST_LOG` takes precedence over -v/-q
fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
