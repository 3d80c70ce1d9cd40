//! Command implementations.
//!
//! Handles:
//! - parse: extract the export into a table
//! - classify: extract, categorize by topic, export, optionally visualize
//! - topics: print the topic keyword mapping
//! - config: print the effective settings

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use watch_extract::{HistoryParser, ParseReport};
use watch_topics::{assign_categories, category_counts, TopicClassifier, TopicsConfig};
use watch_types::WatchHistoryTable;

use crate::export::{write_table, OutputFormat};
use crate::settings::Settings;

/// Load settings and apply the CLI log level override.
pub fn load_settings(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    Ok(settings)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Pick the export format: explicit flag, then file extension, then config.
pub fn resolve_format(
    explicit: Option<OutputFormat>,
    output: &Path,
    settings: &Settings,
) -> OutputFormat {
    explicit
        .or_else(|| OutputFormat::from_path(output))
        .unwrap_or(settings.output_format)
}

fn extract(settings: &Settings, input: &Path) -> Result<ParseReport> {
    let parser = HistoryParser::with_rules(input, settings.extraction.clone())
        .context("Invalid extraction rules")?;
    let report = parser
        .parse_history()
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    if !report.rejections.is_empty() {
        warn!(
            rejected = report.rejections.len(),
            candidates = report.candidates,
            "Some entries were skipped"
        );
    }
    Ok(report)
}

fn topics_config(settings: &Settings, topics_override: Option<usize>) -> Result<TopicsConfig> {
    let mut config = settings.topics.clone();
    if let Some(k) = topics_override {
        config.num_topics = k;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid topic settings: {}", e))?;
    Ok(config)
}

/// Extract the export and write it as a table.
pub fn run_parse(
    settings: &Settings,
    input: &Path,
    output: &Path,
    format: Option<OutputFormat>,
) -> Result<ParseReport> {
    let report = extract(settings, input)?;
    let format = resolve_format(format, output, settings);
    write_table(&report.table, output, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Extracted {} of {} entries into {}",
        report.table.len(),
        report.candidates,
        output.display()
    );
    Ok(report)
}

/// Extract, categorize, and export the categorized table.
pub fn run_classify(
    settings: &Settings,
    input: &Path,
    output: &Path,
    topics_override: Option<usize>,
    format: Option<OutputFormat>,
    viz_dir: Option<&Path>,
) -> Result<WatchHistoryTable> {
    let report = extract(settings, input)?;
    let config = topics_config(settings, topics_override)?;
    let top_n = config.visualization_top_n;

    let mut classifier = TopicClassifier::new(config).context("Failed to create classifier")?;
    let titles = report.table.titles();
    let result = classifier
        .get_video_categories(&titles)
        .context("Topic classification failed")?;

    let table = assign_categories(&report.table, &result.categories)
        .context("Failed to assign categories")?;

    let format = resolve_format(format, output, settings);
    write_table(&table, output, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if let Some(dir) = viz_dir {
        match classifier
            .render_last_fit(dir, top_n)
            .context("Failed to render topic visualization")?
        {
            Some(path) => info!(path = %path.display(), "Visualization written"),
            None => println!("Not enough titles to visualize topics"),
        }
    }

    println!("Categorized {} videos into {}", table.len(), output.display());
    for (label, count) in category_counts(&table) {
        println!("  {:<16} {}", label.to_string(), count);
    }
    Ok(table)
}

/// Fit topics on the export's titles and print their keywords.
pub fn run_topics(
    settings: &Settings,
    input: &Path,
    topics_override: Option<usize>,
) -> Result<Vec<Vec<String>>> {
    let report = extract(settings, input)?;
    let config = topics_config(settings, topics_override)?;

    let mut classifier = TopicClassifier::new(config).context("Failed to create classifier")?;
    let titles = report.table.titles();
    let result = classifier
        .get_video_categories(&titles)
        .context("Topic classification failed")?;

    if result.topic_keywords.is_empty() {
        println!("Not enough titles for topic modeling ({})", titles.len());
    }
    for (k, words) in result.topic_keywords.iter().enumerate() {
        println!("Topic_{}: {}", k, words.join(", "));
    }
    Ok(result.topic_keywords)
}

/// Print the effective settings as TOML.
pub fn show_config(settings: &Settings) -> Result<()> {
    let rendered = settings.to_toml().context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
