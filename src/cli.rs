//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CacheConfig;
use crate::core::render::{OutputFormat, RenderConfig};

/// resume-cache - keep a short list of recently edited resumes.
#[derive(Parser, Debug)]
#[command(name = "resume-cache")]
#[command(
    author,
    version,
    about,
    long_about = r#"resume-cache keeps a bounded, most-recently-added list of resume references
(id, display name, timestamp) next to an editor, so recent resumes can be shown
without asking the backend.

At most 10 entries are kept. Adding an id that is already cached replaces it and
moves it to the front; adding an 11th id drops the least recent one. Reading the
list never changes its order.

Each command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- raw: ids only, one per line

Examples:
    resume-cache add 64f1c2 --name "Backend CV"
    resume-cache list --format md
    resume-cache get 64f1c2
    resume-cache remove 64f1c2
    curl -s $API/resume/resumes?status=incomplete | jq -r '.[]._id' | resume-cache prune
"#
)]
pub struct Cli {
    /// Root directory the store directory is resolved against.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory for all operations (defaults to the current directory).\n\n\
The default store directory is ROOT/.resume-cache, and a relative --store-dir is\n\
resolved against ROOT."
    )]
    pub root: PathBuf,

    /// Directory holding the cache file.
    #[arg(
        long,
        global = true,
        env = "RESUME_CACHE_DIR",
        value_name = "DIR",
        long_help = "Directory holding the cache file (resumeCache.json).\n\n\
Defaults to ROOT/.resume-cache. Can also be set with RESUME_CACHE_DIR."
    )]
    pub store_dir: Option<PathBuf>,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw"
    )]
    pub format: String,

    /// Quiet mode (errors only on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log errors to stderr. Results are still printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (-v debug, -vv trace).
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        long_help = "Raise the log level on stderr: -v for debug, -vv for trace.\n\n\
RUST_LOG, when set, takes precedence."
    )]
    pub verbose: u8,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on md/raw formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add or refresh a resume at the front of the list.
    #[command(
        long_about = "Insert a resume reference at the most-recent position.\n\n\
An existing entry with the same ID is replaced, so the list never holds duplicates.\n\
When the list is full, the least recent entry is dropped.\n\n\
Examples:\n\
  resume-cache add 64f1c2 --name \"Backend CV\"\n\
  resume-cache add 64f1c2 --name \"Backend CV v2\" --timestamp 1717000000000\n"
    )]
    Add {
        /// Resume ID.
        #[arg(value_name = "ID")]
        id: String,

        /// Display name.
        #[arg(long, value_name = "NAME")]
        name: String,

        /// Timestamp in ms since epoch (defaults to now).
        #[arg(long, value_name = "MS")]
        timestamp: Option<i64>,
    },

    /// Show one cached resume by ID.
    #[command(
        long_about = "Emit the cached entry for ID, or nothing if it is not cached.\n\n\
Looking an entry up does not move it.\n\n\
Example:\n\
  resume-cache get 64f1c2\n"
    )]
    Get {
        /// Resume ID.
        #[arg(value_name = "ID")]
        id: String,
    },

    /// List cached resumes, most recent first.
    List,

    /// Remove a resume from the list.
    #[command(
        long_about = "Remove the entry for ID. The order of the remaining entries is kept.\n\
Removing an ID that is not cached does nothing.\n\n\
Example:\n\
  resume-cache remove 64f1c2\n"
    )]
    Remove {
        /// Resume ID.
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Report which of the given IDs are not cached.
    #[command(
        long_about = r#"Given server-side draft IDs, emit the ones that have fallen out of the
local list. Those drafts are no longer reachable from "recent resumes" and are
safe to discard on the server.

IDs are taken from the arguments, or from stdin (one per line) when none are given.

Examples:
    resume-cache prune a1 b2 c3
    cat drafts.txt | resume-cache prune --format raw
"#
    )]
    Prune {
        /// Candidate resume IDs.
        #[arg(value_name = "IDS", num_args = 0..)]
        ids: Vec<String>,
    },

    /// Show store location, entry count and health.
    Status,

    /// Delete the stored list.
    Clear,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let config = CacheConfig::resolve(&root, cli.store_dir.as_deref());
    let cache = config.open();

    tracing::debug!(store = %config.store_dir.display(), "opened resume cache");

    match cli.command {
        Commands::Add {
            id,
            name,
            timestamp,
        } => crate::cache::api::run_add(&cache, &id, &name, timestamp, render_config),

        Commands::Get { id } => crate::cache::api::run_get(&cache, &id, render_config),

        Commands::List => crate::cache::api::run_list(&cache, render_config),

        Commands::Remove { id } => crate::cache::api::run_remove(&cache, &id, render_config),

        Commands::Prune { ids } => crate::cache::api::run_prune(&cache, ids, render_config),

        Commands::Status => crate::cache::api::run_status(&cache, render_config),

        Commands::Clear => crate::cache::api::run_clear(&cache, render_config),
    }
}
