//! Table export and re-import.
//!
//! CSV files always carry a header row, so a zero-row table still records
//! its schema. JSON files hold an array of row objects.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use watch_types::{
    CategoryLabel, WatchHistoryTable, WatchRecord, WatchTimestamp, BASE_COLUMNS,
    CATEGORIZED_COLUMNS,
};

use crate::error::HistoryError;

/// File format of an exported table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Write `table` to `path` in the given format.
pub fn write_table(
    table: &WatchHistoryTable,
    path: &Path,
    format: OutputFormat,
) -> Result<(), HistoryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| HistoryError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    match format {
        OutputFormat::Csv => write_csv(table, path)?,
        OutputFormat::Json => write_json(table, path)?,
    }
    info!(rows = table.len(), path = %path.display(), ?format, "Exported table");
    Ok(())
}

/// Read a table previously written by [`write_table`].
pub fn read_table(path: &Path, format: OutputFormat) -> Result<WatchHistoryTable, HistoryError> {
    let table = match format {
        OutputFormat::Csv => read_csv(path)?,
        OutputFormat::Json => read_json(path)?,
    };
    debug!(rows = table.len(), path = %path.display(), "Read table");
    Ok(table)
}

/// Write a table as CSV with a header row.
pub fn write_csv(table: &WatchHistoryTable, path: &Path) -> Result<(), HistoryError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;

    for record in table {
        let date = record.watched_at.to_string();
        let mut row = vec![
            record.video_title.as_str(),
            record.video_url.as_str(),
            record.channel_name.as_str(),
            record.channel_url.as_str(),
            date.as_str(),
        ];
        let category = record.category.map(|c| c.to_string());
        if table.is_categorized() {
            row.push(category.as_deref().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    writer.flush().map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Read a CSV table, checking the header against the schema.
pub fn read_csv(path: &Path) -> Result<WatchHistoryTable, HistoryError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let header: Vec<&str> = headers.iter().collect();

    let categorized = if header == BASE_COLUMNS {
        false
    } else if header == CATEGORIZED_COLUMNS {
        true
    } else {
        return Err(HistoryError::Schema(format!(
            "unexpected header {:?} in {}",
            header,
            path.display()
        )));
    };

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or_default();

        let watched_at: WatchTimestamp = field(4).parse()?;
        let mut record = WatchRecord::new(field(0), field(1), field(2), field(3), watched_at)?;
        if categorized {
            let category: CategoryLabel = field(5).parse().map_err(|e| {
                HistoryError::Schema(format!("row {}: {}", line + 1, e))
            })?;
            record = record.with_category(category);
        }
        records.push(record);
    }

    Ok(WatchHistoryTable::from_parts(records, categorized)?)
}

/// Write a table as a pretty-printed JSON array of rows.
pub fn write_json(table: &WatchHistoryTable, path: &Path) -> Result<(), HistoryError> {
    let file = File::create(path).map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, table.records())?;
    writer.flush().map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Read a JSON table.
///
/// The table counts as categorized when every row carries a category; an
/// empty array reads back as an uncategorized table.
pub fn read_json(path: &Path) -> Result<WatchHistoryTable, HistoryError> {
    let file = File::open(path).map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<WatchRecord> = serde_json::from_reader(BufReader::new(file))?;
    for record in &records {
        record.validate()?;
    }

    let categorized = !records.is_empty() && records.iter().all(|r| r.category.is_some());
    Ok(WatchHistoryTable::from_parts(records, categorized)?)
}
