//! Document loading.

use std::fs;
use std::path::{Path, PathBuf};

use scraper::Html;
use tracing::{error, info};

use crate::error::ExtractError;

/// A parsed watch-history export.
pub struct HistoryDocument {
    html: Html,
    source: Option<PathBuf>,
}

impl HistoryDocument {
    /// Read and parse an export file.
    ///
    /// Unreadable files and invalid UTF-8 are fatal for the document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|source| {
            error!(path = %path.display(), error = %source, "Error loading file");
            ExtractError::Load {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let text = String::from_utf8(bytes).map_err(|source| {
            error!(path = %path.display(), error = %source, "Export is not valid UTF-8");
            ExtractError::Encoding {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let mut document = Self::parse(&text);
        document.source = Some(path.to_path_buf());
        info!(path = %path.display(), "Successfully loaded export");
        Ok(document)
    }

    /// Parse markup already held in memory.
    pub fn parse(markup: &str) -> Self {
        let markup = markup.strip_prefix('\u{FEFF}').unwrap_or(markup);
        Self {
            html: Html::parse_document(markup),
            source: None,
        }
    }

    /// Underlying parse tree.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// File the document was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html><body><p>hello</p></body></html>").unwrap();

        let doc = HistoryDocument::load(file.path()).unwrap();
        assert_eq!(doc.source(), Some(file.path()));
        let p = scraper::Selector::parse("p").unwrap();
        assert_eq!(doc.html().select(&p).count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = HistoryDocument::load(dir.path().join("missing.html"));
        assert!(matches!(result, Err(ExtractError::Load { .. })));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x3c, 0x70, 0x3e, 0xff, 0xfe, 0x3c]).unwrap();

        let result = HistoryDocument::load(file.path());
        assert!(matches!(result, Err(ExtractError::Encoding { .. })));
    }

    #[test]
    fn test_parse_strips_bom() {
        let doc = HistoryDocument::parse("\u{FEFF}<p>x</p>");
        assert!(doc.source().is_none());
        let p = scraper::Selector::parse("p").unwrap();
        assert_eq!(doc.html().select(&p).count(), 1);
    }
}
