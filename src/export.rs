//! Named CSV export artifacts.
//!
//! An export carries a filename that embeds the export kind and an ISO
//! timestamp, a `text/csv` MIME type, and the rendered bytes. Writing to disk
//! goes through a temp file and a rename, so an interrupted write never leaves
//! a partial CSV behind.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::csv::{self, CsvLayout};
use crate::error::Result;
use crate::models::{GroupedTrend, TrendRecord};

pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// What view an export was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Ranked search results.
    Results,
    /// Historical series of a custom search.
    Search,
    /// The "trending now" list.
    Trending,
    /// Grouped per-title breakdown.
    Grouped,
}

impl ExportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportKind::Results => "results",
            ExportKind::Search => "search",
            ExportKind::Trending => "trending",
            ExportKind::Grouped => "grouped",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A downloadable CSV document.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub mime_type: &'static str,
    pub kind: ExportKind,
    pub bytes: Vec<u8>,
}

impl CsvExport {
    pub fn new(records: &[TrendRecord], kind: ExportKind, layout: CsvLayout, now: DateTime<Utc>) -> Self {
        Self::from_text(csv::to_csv(records, layout), kind, now)
    }

    pub fn grouped(groups: &[GroupedTrend], now: DateTime<Utc>) -> Self {
        Self::from_text(csv::grouped_to_csv(groups), ExportKind::Grouped, now)
    }

    fn from_text(text: String, kind: ExportKind, now: DateTime<Utc>) -> Self {
        Self {
            filename: export_filename(kind, now),
            mime_type: CSV_MIME_TYPE,
            kind,
            bytes: text.into_bytes(),
        }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    /// Write the export into `dir`, creating it if needed. Returns the final path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let dest = dir.join(&self.filename);
        let tmp_dest = dest.with_extension("csv.tmp");

        debug!("Writing {} export to {}", self.kind, tmp_dest.display());

        let result = (|| -> Result<()> {
            fs::write(&tmp_dest, &self.bytes)?;
            fs::rename(&tmp_dest, &dest)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_dest);
        }
        result?;

        info!(
            "Exported {} ({} bytes) to {}",
            self.kind,
            self.bytes.len(),
            dest.display()
        );
        Ok(dest)
    }
}

/// `trend-<kind>-<timestamp>.csv`, with the timestamp in ISO-8601 basic
/// format (`20240101T000000.000Z`) so the name carries no `:`.
pub fn export_filename(kind: ExportKind, now: DateTime<Utc>) -> String {
    format!("trend-{}-{}.csv", kind, now.format("%Y%m%dT%H%M%S%.3fZ"))
}
