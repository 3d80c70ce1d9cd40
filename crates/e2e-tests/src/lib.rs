//! End-to-end test infrastructure for watch-history.
//!
//! Provides a shared TestHarness and builders for Takeout-shaped HTML
//! covering the full extract-classify-export pipeline.

use std::path::PathBuf;

/// Class string of a top-level Takeout event container.
pub const CONTAINER_CLASS: &str = "outer-cell mdl-cell mdl-cell--12-col mdl-shadow--2dp";

/// Class string of the content cell holding the entry body.
pub const CONTENT_CELL_CLASS: &str = "content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1";

/// One watch entry as it appears in an export.
#[derive(Debug, Clone)]
pub struct EntryFixture {
    pub title: String,
    pub video_url: String,
    pub channel: String,
    pub channel_url: String,
    /// Raw timestamp line, e.g. `Feb 23, 2024, 7:36:45 PM EST`
    pub timestamp: String,
}

impl EntryFixture {
    /// Entry with URLs derived from `id`.
    pub fn new(id: usize, title: &str, channel: &str, timestamp: &str) -> Self {
        Self {
            title: title.to_string(),
            video_url: format!("https://www.youtube.com/watch?v=vid{}", id),
            channel: channel.to_string(),
            channel_url: format!("https://www.youtube.com/channel/ch{}", id),
            timestamp: timestamp.to_string(),
        }
    }

    /// Render the full container block.
    pub fn to_html(&self) -> String {
        let body = format!(
            "Watched\u{a0}<a href=\"{}\">{}</a><br><a href=\"{}\">{}</a><br>{}<br>",
            self.video_url, self.title, self.channel_url, self.channel, self.timestamp
        );
        container_html(&body)
    }
}

/// Wrap a content-cell body in the Takeout container markup.
pub fn container_html(cell_body: &str) -> String {
    format!(
        r#"<div class="{container}"><div class="mdl-grid">
<div class="header-cell mdl-cell mdl-cell--12-col"><p class="mdl-typography--title">YouTube<br></p></div>
<div class="{cell}">{body}</div>
<div class="content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1 mdl-typography--text-right"></div>
<div class="content-cell mdl-cell mdl-cell--12-col mdl-typography--caption"><b>Products:</b><br>&emsp;YouTube<br></div>
</div></div>"#,
        container = CONTAINER_CLASS,
        cell = CONTENT_CELL_CLASS,
        body = cell_body
    )
}

/// A container whose content cell has only one link.
pub fn one_link_entry_html(title: &str) -> String {
    container_html(&format!(
        "Watched <a href=\"https://www.youtube.com/watch?v=gone\">{}</a><br>Feb 23, 2024, 7:36:45 PM EST<br>",
        title
    ))
}

/// A container whose trailing line is not a Takeout timestamp.
pub fn bad_timestamp_entry_html(title: &str, timestamp: &str) -> String {
    container_html(&format!(
        "Watched <a href=\"https://www.youtube.com/watch?v=x\">{}</a><br><a href=\"https://www.youtube.com/channel/y\">Channel</a><br>{}<br>",
        title, timestamp
    ))
}

/// A container without any content cell.
pub fn no_content_cell_html() -> String {
    format!(
        r#"<div class="{}"><div class="mdl-grid"><div class="header-cell mdl-cell mdl-cell--12-col">YouTube</div></div></div>"#,
        CONTAINER_CLASS
    )
}

/// Wrap container blocks into a complete export document.
pub fn takeout_document(blocks: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>History</title></head>\
         <body><div class=\"mdl-grid\">{}</div></body></html>",
        blocks.concat()
    )
}

/// Entries with the given titles, one minute apart.
pub fn entries_with_titles(titles: &[&str]) -> Vec<EntryFixture> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            EntryFixture::new(
                i,
                title,
                &format!("Channel {}", i % 3),
                &format!("Feb 23, 2024, 7:{:02}:45 PM EST", i % 60),
            )
        })
        .collect()
}

/// Titles from four easily separable subjects.
pub fn mixed_titles() -> Vec<&'static str> {
    vec![
        "Python Programming Tutorial - Basic Concepts",
        "Learn Python in 2024 - Complete Course",
        "Gaming Stream Highlights - Best Moments",
        "Epic Gaming Montage 2024",
        "Latest Tech News and Updates",
        "Technology Review - New Gadgets 2024",
        "Random Vlog - My Daily Life",
        "Personal Update - Life Changes",
    ]
}

/// Shared test harness for E2E tests.
///
/// Owns a temp directory where exports and outputs are written.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new test harness with an empty temp directory.
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path inside the harness directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write an export document and return its path.
    pub fn write_export(&self, name: &str, html: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, html).expect("Failed to write export");
        path
    }

    /// Write an export made of the given entries.
    pub fn write_entries(&self, name: &str, entries: &[EntryFixture]) -> PathBuf {
        let blocks: Vec<String> = entries.iter().map(EntryFixture::to_html).collect();
        self.write_export(name, &takeout_document(&blocks))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
