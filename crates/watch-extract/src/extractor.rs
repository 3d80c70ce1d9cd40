//! Entry extraction.
//!
//! Each top-level container is handled independently: it either yields a
//! fully-populated [`WatchRecord`] or a [`RejectReason`]. Nothing here
//! panics or aborts the scan because one block is malformed.

use std::fmt;

use scraper::{ElementRef, Selector};
use tracing::{debug, info, warn};
use watch_types::WatchRecord;

use crate::aggregator::{aggregate, ParseReport};
use crate::error::{ExtractError, RejectReason, Rejection};
use crate::loader::HistoryDocument;
use crate::rules::{parse_selector, ExtractionRules};
use crate::timestamp::parse_watch_timestamp;

/// Role a link plays inside a content cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRole {
    /// The watched item
    Item,
    /// The item's channel
    Channel,
}

impl fmt::Display for LinkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkRole::Item => write!(f, "item"),
            LinkRole::Channel => write!(f, "channel"),
        }
    }
}

/// Extracts watch records from candidate markup blocks.
pub struct EntryExtractor {
    rules: ExtractionRules,
    container: Selector,
    content_cell: Selector,
    link: Selector,
}

impl EntryExtractor {
    /// Compile a rule table into an extractor.
    pub fn new(rules: ExtractionRules) -> Result<Self, ExtractError> {
        rules.validate().map_err(ExtractError::InvalidRules)?;
        let container = rules.container_selector()?;
        let content_cell = rules.content_cell_selector()?;
        let link = parse_selector("a")?;
        Ok(Self {
            rules,
            container,
            content_cell,
            link,
        })
    }

    /// Rules this extractor was built from.
    pub fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    /// Top-level event containers in document order.
    pub fn candidates<'a>(
        &'a self,
        document: &'a HistoryDocument,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        document.html().select(&self.container)
    }

    /// Extract one record from a candidate container.
    pub fn extract_entry(&self, entry: ElementRef<'_>) -> Result<WatchRecord, RejectReason> {
        let content = entry
            .select(&self.content_cell)
            .next()
            .ok_or(RejectReason::MissingContentCell)?;

        let links: Vec<ElementRef<'_>> = content.select(&self.link).collect();
        let required = self.rules.required_links();
        if links.len() < required {
            return Err(RejectReason::TooFewLinks {
                found: links.len(),
                required,
            });
        }
        let item = links[self.rules.item_link_index];
        let channel = links[self.rules.channel_link_index];

        let raw_date = last_text_line(content);
        let watched_at = parse_watch_timestamp(&raw_date, &self.rules.timestamp_format)
            .map_err(|source| RejectReason::UnparseableTimestamp {
                raw: raw_date.clone(),
                source,
            })?;

        let video_url = href(item, LinkRole::Item)?;
        let channel_url = href(channel, LinkRole::Channel)?;
        let video_title = link_text(item);
        let channel_name = link_text(channel);

        // Same rule as WatchRecord::validate, so exported rows read back
        let fields = [
            ("video", &video_title),
            ("video_url", &video_url),
            ("channel", &channel_name),
            ("channel_url", &channel_url),
        ];
        if let Some(name) = fields
            .iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
        {
            return Err(RejectReason::EmptyField(name));
        }

        Ok(WatchRecord {
            video_title,
            video_url,
            channel_name,
            channel_url,
            watched_at,
            category: None,
        })
    }

    /// Extract every candidate in the document.
    ///
    /// Rejections are logged and collected; the scan always completes.
    pub fn scan(&self, document: &HistoryDocument) -> ParseReport {
        let candidates: Vec<ElementRef<'_>> = self.candidates(document).collect();
        info!(count = candidates.len(), "Found potential watch entries");

        let outcomes = candidates
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                self.extract_entry(entry).map_err(|reason| {
                    log_rejection(index, &reason);
                    Rejection::new(index, reason)
                })
            });

        aggregate(outcomes)
    }

    /// Parse markup held in memory and extract every candidate.
    pub fn scan_markup(&self, markup: &str) -> ParseReport {
        self.scan(&HistoryDocument::parse(markup))
    }
}

fn log_rejection(index: usize, reason: &RejectReason) {
    match reason {
        RejectReason::MissingContentCell | RejectReason::TooFewLinks { .. } => {
            debug!(entry_index = index, reason = %reason, "Skipping entry");
        }
        _ => {
            warn!(entry_index = index, reason = %reason, "Skipping entry");
        }
    }
}

/// Text of a block as trimmed, non-empty text nodes joined by newlines;
/// returns the last line.
fn last_text_line(element: ElementRef<'_>) -> String {
    let text = element
        .text()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    text.rsplit('\n').next().unwrap_or("").trim().to_string()
}

fn href(link: ElementRef<'_>, role: LinkRole) -> Result<String, RejectReason> {
    link.value()
        .attr("href")
        .map(str::to_string)
        .ok_or(RejectReason::MissingHref(role))
}

fn link_text(link: ElementRef<'_>) -> String {
    link.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimestampError;

    const OUTER: &str = "outer-cell mdl-cell mdl-cell--12-col mdl-shadow--2dp";

    fn wrap(content_cell: &str) -> String {
        format!(
            r#"<html><body><div class="mdl-grid">
            <div class="{OUTER}">
              <div class="mdl-grid">
                <div class="header-cell mdl-cell mdl-cell--12-col">
                  <p class="mdl-typography--title">YouTube</p>
                </div>
                {content_cell}
                <div class="content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1 mdl-typography--text-right"></div>
              </div>
            </div></div></body></html>"#
        )
    }

    fn valid_cell() -> &'static str {
        r#"<div class="content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1">
             Watched <a href="https://www.youtube.com/watch?v=123">Test Video</a><br>
             <a href="https://www.youtube.com/channel/456">Test Channel</a><br>
             Feb 23, 2024, 7:36:45 PM EST
           </div>"#
    }

    fn extract_first(markup: &str) -> Result<WatchRecord, RejectReason> {
        let extractor = EntryExtractor::new(ExtractionRules::default()).unwrap();
        let doc = HistoryDocument::parse(markup);
        let entry = extractor.candidates(&doc).next().expect("candidate");
        extractor.extract_entry(entry)
    }

    #[test]
    fn test_extract_valid_entry() {
        let record = extract_first(&wrap(valid_cell())).unwrap();
        assert_eq!(record.video_title, "Test Video");
        assert_eq!(record.video_url, "https://www.youtube.com/watch?v=123");
        assert_eq!(record.channel_name, "Test Channel");
        assert_eq!(record.channel_url, "https://www.youtube.com/channel/456");
        assert_eq!(record.watched_at.to_string(), "2024-02-23 19:36:45 EST");
        assert!(record.category.is_none());
    }

    #[test]
    fn test_content_cell_tokens_any_order() {
        let cell = valid_cell().replace(
            "content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1",
            "mdl-typography--body-1 extra-token mdl-cell--6-col content-cell",
        );
        assert!(extract_first(&wrap(&cell)).is_ok());
    }

    #[test]
    fn test_missing_content_cell() {
        let cell = r#"<div class="content-cell mdl-cell--6-col">Invalid structure</div>"#;
        assert_eq!(
            extract_first(&wrap(cell)),
            Err(RejectReason::MissingContentCell)
        );
    }

    #[test]
    fn test_single_link_rejected() {
        let cell = r#"<div class="content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1">
             Watched <a href="https://www.youtube.com/watch?v=123">Test Video</a><br>
             Feb 23, 2024, 7:36:45 PM EST
           </div>"#;
        assert_eq!(
            extract_first(&wrap(cell)),
            Err(RejectReason::TooFewLinks {
                found: 1,
                required: 2
            })
        );
    }

    #[test]
    fn test_unparseable_timestamp() {
        let cell = valid_cell().replace("Feb 23, 2024, 7:36:45 PM EST", "23 Feb 2024 19:36");
        match extract_first(&wrap(&cell)) {
            Err(RejectReason::UnparseableTimestamp { raw, source }) => {
                assert_eq!(raw, "23 Feb 2024 19:36");
                assert_eq!(source, TimestampError::InvalidZone("19:36".to_string()));
            }
            other => panic!("Expected timestamp rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_href() {
        let cell = valid_cell().replace(r#"href="https://www.youtube.com/channel/456""#, "");
        assert_eq!(
            extract_first(&wrap(&cell)),
            Err(RejectReason::MissingHref(LinkRole::Channel))
        );
    }

    #[test]
    fn test_empty_link_text() {
        let cell = valid_cell().replace(">Test Video<", ">   <");
        assert_eq!(
            extract_first(&wrap(&cell)),
            Err(RejectReason::EmptyField("video"))
        );
    }

    #[test]
    fn test_blank_href_rejected() {
        let cell = valid_cell().replace(
            r#"href="https://www.youtube.com/watch?v=123""#,
            r#"href="   ""#,
        );
        assert_eq!(
            extract_first(&wrap(&cell)),
            Err(RejectReason::EmptyField("video_url"))
        );
    }

    #[test]
    fn test_extracted_record_passes_validation() {
        let record = extract_first(&wrap(valid_cell())).unwrap();
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_container_class_must_match_exactly() {
        let markup = wrap(valid_cell()).replace(OUTER, "outer-cell mdl-cell--12-col");
        let extractor = EntryExtractor::new(ExtractionRules::default()).unwrap();
        let report = extractor.scan_markup(&markup);
        assert_eq!(report.candidates, 0);
        assert!(report.table.is_empty());
    }

    #[test]
    fn test_scan_continues_after_rejection() {
        let bad = wrap(r#"<div class="content-cell mdl-cell--6-col">Invalid</div>"#);
        let good = wrap(valid_cell());
        let markup = format!("{}{}{}", bad, good, bad);

        let extractor = EntryExtractor::new(ExtractionRules::default()).unwrap();
        let report = extractor.scan_markup(&markup);
        assert_eq!(report.candidates, 3);
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.rejections.len(), 2);
        assert_eq!(report.rejections[0].index, 0);
        assert_eq!(report.rejections[1].index, 2);
    }

    #[test]
    fn test_custom_link_indices() {
        let cell = r#"<div class="content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1">
             <a href="/channel/9">Chan</a> uploaded <a href="/watch?v=9">Clip</a><br>
             Feb 23, 2024, 7:36:45 PM EST
           </div>"#;
        let rules = ExtractionRules {
            item_link_index: 1,
            channel_link_index: 0,
            ..Default::default()
        };
        let extractor = EntryExtractor::new(rules).unwrap();
        let doc = HistoryDocument::parse(&wrap(cell));
        let entry = extractor.candidates(&doc).next().unwrap();
        let record = extractor.extract_entry(entry).unwrap();
        assert_eq!(record.video_title, "Clip");
        assert_eq!(record.channel_name, "Chan");
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let rules = ExtractionRules {
            content_cell_tokens: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            EntryExtractor::new(rules),
            Err(ExtractError::InvalidRules(_))
        ));
    }
}
