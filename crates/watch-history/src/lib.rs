//! Watch history library exports.
//!
//! This crate provides the `watch-history` binary: Takeout export in, table
//! (optionally categorized by topic) out.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (parse, classify, topics, config)
//! - `export`: CSV and JSON table files
//! - `settings`: Layered configuration

pub mod cli;
pub mod commands;
pub mod error;
pub mod export;
pub mod settings;

pub use cli::{Cli, Commands};
pub use commands::{
    init_logging, load_settings, resolve_format, run_classify, run_parse, run_topics, show_config,
};
pub use error::HistoryError;
pub use export::{read_table, write_table, OutputFormat};
pub use settings::Settings;
