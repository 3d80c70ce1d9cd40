//! Watch History
//!
//! Extracts a YouTube Takeout watch-history export into a table and groups
//! the watched titles into topic categories.
//!
//! # Usage
//!
//! ```bash
//! watch-history parse watch-history.html history.csv
//! watch-history classify watch-history.html history.csv [--topics K] [--viz-dir DIR]
//! watch-history topics watch-history.html [--topics K]
//! watch-history config
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/watch-history/config.toml)
//! 3. Environment variables (WATCH_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use watch_history::{
    init_logging, load_settings, run_classify, run_parse, run_topics, show_config, Cli, Commands,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&settings)?;

    match cli.command {
        Commands::Parse {
            input,
            output,
            format,
        } => {
            run_parse(&settings, &input, &output, format)?;
        }
        Commands::Classify {
            input,
            output,
            topics,
            format,
            viz_dir,
        } => {
            run_classify(
                &settings,
                &input,
                &output,
                topics,
                format,
                viz_dir.as_deref(),
            )?;
        }
        Commands::Topics { input, topics } => {
            run_topics(&settings, &input, topics)?;
        }
        Commands::Config => {
            show_config(&settings)?;
        }
    }

    Ok(())
}
