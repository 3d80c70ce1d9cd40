//! CLI argument parsing for watch-history.
//!
//! CLI flags override every other configuration source.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::export::OutputFormat;

/// Watch History
///
/// Turns a YouTube Takeout watch-history export into a table and groups the
/// watched titles into topic categories.
#[derive(Parser, Debug)]
#[command(name = "watch-history")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/watch-history/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract watch entries into a table
    Parse {
        /// Takeout watch-history.html
        input: PathBuf,

        /// Output table file
        output: PathBuf,

        /// Output format (default from config or file extension)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Extract, categorize by topic and export
    Classify {
        /// Takeout watch-history.html
        input: PathBuf,

        /// Output table file
        output: PathBuf,

        /// Override number of topics
        #[arg(short, long)]
        topics: Option<usize>,

        /// Output format (default from config or file extension)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the topic visualization into this directory
        #[arg(long)]
        viz_dir: Option<PathBuf>,
    },

    /// Print the keywords of each topic
    Topics {
        /// Takeout watch-history.html
        input: PathBuf,

        /// Override number of topics
        #[arg(short, long)]
        topics: Option<usize>,
    },

    /// Print the effective configuration
    Config,
}
