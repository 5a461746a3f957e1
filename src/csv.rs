//! CSV rendering of trend records, plus the matching parser.
//!
//! Every field is quoted and embedded quotes are doubled (RFC 4180). Line
//! breaks inside a field are written as a single space, so every row is
//! exactly one line. Rows are joined with `\n` and the output carries no
//! trailing newline.

use std::mem::take;

use crate::models::{GroupedTrend, TrendRecord};

/// Column layout of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    /// `Rank, Platform, Title, Percentage, Change, Timestamp`
    Ranked,
    /// `Date, Term, Platform, Search Volume (%), Change (%)`
    Historical,
}

impl CsvLayout {
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            CsvLayout::Ranked => &["Rank", "Platform", "Title", "Percentage", "Change", "Timestamp"],
            CsvLayout::Historical => &["Date", "Term", "Platform", "Search Volume (%)", "Change (%)"],
        }
    }

    fn row(self, rank: usize, record: &TrendRecord) -> Vec<String> {
        match self {
            CsvLayout::Ranked => vec![
                rank.to_string(),
                record.platform.clone(),
                record.title.clone(),
                number_cell(record.percentage),
                number_cell(record.change),
                record.iso_timestamp(),
            ],
            CsvLayout::Historical => vec![
                record.iso_timestamp(),
                record.title.clone(),
                record.platform.clone(),
                number_cell(record.percentage),
                number_cell(record.change),
            ],
        }
    }
}

const GROUPED_HEADERS: [&str; 6] = ["Rank", "Title", "Score", "Platform", "Percentage", "Change"];

/// Render records with the given layout. Rank is the 1-based input position.
pub fn to_csv(records: &[TrendRecord], layout: CsvLayout) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(format_row(layout.headers()));
    for (i, record) in records.iter().enumerate() {
        lines.push(format_row(&layout.row(i + 1, record)));
    }
    lines.join("\n")
}

/// Render grouped trends, one row per (group, platform). Rank is the group position.
pub fn grouped_to_csv(groups: &[GroupedTrend]) -> String {
    let mut lines = vec![format_row(&GROUPED_HEADERS)];
    for (i, group) in groups.iter().enumerate() {
        for (platform, stat) in &group.platforms {
            lines.push(format_row(&[
                (i + 1).to_string(),
                group.title.clone(),
                number_cell(group.score),
                platform.clone(),
                number_cell(stat.percentage),
                number_cell(stat.change),
            ]));
        }
    }
    lines.join("\n")
}

/// Quote every field, doubling embedded quotes, and join with commas.
///
/// `\r\n`, `\r` and `\n` inside a field are each replaced by one space.
pub fn format_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| {
            let flat = f.as_ref().replace("\r\n", " ").replace(['\r', '\n'], " ");
            format!("\"{}\"", flat.replace('"', "\"\""))
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn number_cell(value: f64) -> String {
    // `-0.0` renders as "-0"
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Parse CSV text into rows of fields.
///
/// Accepts quoted and unquoted fields, doubled quotes, CRLF line endings, and
/// separators or line breaks inside quotes. Blank lines are skipped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }

    rows
}
