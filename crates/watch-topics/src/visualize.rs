//! Topic keyword visualization.
//!
//! Writes a static SVG bar chart of per-topic keyword weights alongside a
//! JSON copy of the same data.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::TopicsError;

/// SVG chart file name.
pub const VISUALIZATION_FILE: &str = "topic_visualization.svg";

/// JSON weights file name.
pub const WEIGHTS_FILE: &str = "topic_weights.json";

const CHART_WIDTH: usize = 640;
const LABEL_WIDTH: usize = 180;
const BAR_HEIGHT: usize = 16;
const BAR_GAP: usize = 4;
const TOPIC_HEADER: usize = 28;

#[derive(Debug, Serialize)]
struct TopicWeights<'a> {
    topic: String,
    keywords: Vec<KeywordWeight<'a>>,
}

#[derive(Debug, Serialize)]
struct KeywordWeight<'a> {
    word: &'a str,
    weight: f64,
}

/// Render the top `top_n` keywords of every topic into `dir`.
///
/// Creates `dir` if needed and returns the path of the SVG chart.
pub fn render_topic_weights(
    weights: &[Vec<(String, f64)>],
    dir: &Path,
    top_n: usize,
) -> Result<PathBuf, TopicsError> {
    fs::create_dir_all(dir).map_err(|source| TopicsError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let topics: Vec<TopicWeights<'_>> = weights
        .iter()
        .enumerate()
        .map(|(k, words)| TopicWeights {
            topic: format!("Topic_{}", k),
            keywords: words
                .iter()
                .take(top_n)
                .map(|(word, weight)| KeywordWeight {
                    word: word.as_str(),
                    weight: *weight,
                })
                .collect(),
        })
        .collect();

    let json_path = dir.join(WEIGHTS_FILE);
    let json = serde_json::to_string_pretty(&topics)?;
    write_file(&json_path, &json)?;

    let svg_path = dir.join(VISUALIZATION_FILE);
    write_file(&svg_path, &render_svg(&topics)?)?;

    info!(
        topics = topics.len(),
        path = %svg_path.display(),
        "Wrote topic visualization"
    );
    Ok(svg_path)
}

fn write_file(path: &Path, contents: &str) -> Result<(), TopicsError> {
    fs::write(path, contents).map_err(|source| TopicsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn render_svg(topics: &[TopicWeights<'_>]) -> Result<String, std::fmt::Error> {
    let height: usize = topics
        .iter()
        .map(|t| TOPIC_HEADER + t.keywords.len() * (BAR_HEIGHT + BAR_GAP))
        .sum::<usize>()
        .max(TOPIC_HEADER);
    let bar_space = (CHART_WIDTH - LABEL_WIDTH - 60) as f64;

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
        w = CHART_WIDTH,
        h = height
    )?;

    let mut y = 0;
    for topic in topics {
        y += TOPIC_HEADER;
        writeln!(
            svg,
            r#"  <text x="4" y="{}" font-weight="bold">{}</text>"#,
            y - 8,
            escape_xml(&topic.topic)
        )?;

        // Bars scale to the heaviest keyword within the topic
        let max = topic
            .keywords
            .iter()
            .map(|k| k.weight)
            .fold(0.0_f64, f64::max);
        for keyword in &topic.keywords {
            let width = if max > 0.0 {
                keyword.weight / max * bar_space
            } else {
                0.0
            };
            writeln!(
                svg,
                r#"  <text x="{}" y="{}" text-anchor="end">{}</text>"#,
                LABEL_WIDTH - 6,
                y + BAR_HEIGHT - 4,
                escape_xml(keyword.word)
            )?;
            writeln!(
                svg,
                r##"  <rect x="{}" y="{}" width="{:.1}" height="{}" fill="#4c78a8"/>"##,
                LABEL_WIDTH,
                y,
                width,
                BAR_HEIGHT
            )?;
            writeln!(
                svg,
                r#"  <text x="{:.1}" y="{}">{:.4}</text>"#,
                LABEL_WIDTH as f64 + width + 4.0,
                y + BAR_HEIGHT - 4,
                keyword.weight
            )?;
            y += BAR_HEIGHT + BAR_GAP;
        }
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
