//! File-level entry point.

use std::path::{Path, PathBuf};

use crate::aggregator::ParseReport;
use crate::error::ExtractError;
use crate::extractor::EntryExtractor;
use crate::loader::HistoryDocument;
use crate::rules::ExtractionRules;

/// Parses one Takeout watch-history export.
pub struct HistoryParser {
    file_path: PathBuf,
    extractor: EntryExtractor,
}

impl HistoryParser {
    /// Create a parser using the default Takeout rules.
    pub fn new(file_path: impl Into<PathBuf>) -> Result<Self, ExtractError> {
        Self::with_rules(file_path, ExtractionRules::default())
    }

    /// Create a parser with a custom rule table.
    pub fn with_rules(
        file_path: impl Into<PathBuf>,
        rules: ExtractionRules,
    ) -> Result<Self, ExtractError> {
        Ok(Self {
            file_path: file_path.into(),
            extractor: EntryExtractor::new(rules)?,
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load the export and extract every watch entry.
    ///
    /// Only load failures are errors; malformed entries end up in
    /// [`ParseReport::rejections`].
    pub fn parse_history(&self) -> Result<ParseReport, ExtractError> {
        let document = HistoryDocument::load(&self.file_path)?;
        Ok(self.extractor.scan(&document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watch_types::BASE_COLUMNS;

    const SAMPLE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="mdl-grid">
  <div class="outer-cell mdl-cell mdl-cell--12-col mdl-shadow--2dp">
    <div class="mdl-grid">
      <div class="header-cell mdl-cell mdl-cell--12-col"><p class="mdl-typography--title">YouTube</p></div>
      <div class="content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1">
        Watched <a href="https://www.youtube.com/watch?v=123">Test Video</a><br>
        <a href="https://www.youtube.com/channel/456">Test Channel</a><br>
        Feb 23, 2024, 7:36:45 PM EST
      </div>
    </div>
  </div>
</div>
</body></html>"#;

    #[test]
    fn test_parser_initialization() {
        let parser = HistoryParser::new("watch-history.html").unwrap();
        assert_eq!(parser.file_path(), Path::new("watch-history.html"));
    }

    #[test]
    fn test_parse_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test-watch-history.html");
        std::fs::write(&path, SAMPLE).unwrap();

        let report = HistoryParser::new(&path).unwrap().parse_history().unwrap();
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.columns(), BASE_COLUMNS);
        assert!(report.rejections.is_empty());
    }

    #[test]
    fn test_parse_history_invalid_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid-watch-history.html");
        std::fs::write(
            &path,
            r#"<div class="mdl-grid">
                 <div class="outer-cell mdl-cell mdl-cell--12-col mdl-shadow--2dp">
                   <div class="mdl-grid">
                     <div class="content-cell mdl-cell--6-col">Invalid structure</div>
                   </div>
                 </div>
               </div>"#,
        )
        .unwrap();

        let report = HistoryParser::new(&path).unwrap().parse_history().unwrap();
        assert_eq!(report.table.len(), 0);
        assert_eq!(report.table.columns(), BASE_COLUMNS);
        assert_eq!(report.rejections.len(), 1);
    }

    #[test]
    fn test_parse_history_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let parser = HistoryParser::new(dir.path().join("nope.html")).unwrap();
        assert!(matches!(
            parser.parse_history(),
            Err(ExtractError::Load { .. })
        ));
    }
}
