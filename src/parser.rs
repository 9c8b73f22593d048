//! CSV ingestion for uploaded earthquake tables.
//!
//! Parsing is strict at the file level (ragged rows, bad encoding and missing
//! required columns fail the upload) and lenient at the field level: a number
//! or date that does not parse becomes `None` on the typed [`QuakeRecord`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use serde::Serialize;

use crate::error::PipelineError;

pub const REGION_COLUMN: &str = "state";
pub const LATITUDE_COLUMN: &str = "latitude";
pub const LONGITUDE_COLUMN: &str = "longitude";
pub const SIGNIFICANCE_COLUMN: &str = "significance";
pub const DATE_COLUMN: &str = "date";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    REGION_COLUMN,
    LATITUDE_COLUMN,
    LONGITUDE_COLUMN,
    SIGNIFICANCE_COLUMN,
    DATE_COLUMN,
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// Month-first is tried before day-first, so "03/04/2020" is March 4th.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const UTC_SUFFIXES: &[&str] = &[" UTC", " GMT"];

/// An uploaded CSV with its header row and untyped cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Column positions of the fields the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub region: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub significance: usize,
    pub date: usize,
}

/// Typed view of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeRecord {
    pub region: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub significance: Option<f64>,
    pub date: Option<NaiveDateTime>,
}

/// Parses raw CSV bytes into a [`Table`].
///
/// # Errors
///
/// Returns [`PipelineError::EmptyFile`] when there is no header row,
/// [`PipelineError::Encoding`] for invalid UTF-8 and [`PipelineError::Parse`]
/// for any other CSV error, such as a row with the wrong number of fields.
pub fn parse_table(bytes: &[u8]) -> Result<Table, PipelineError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::Headers)
        .from_reader(bytes);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(PipelineError::EmptyFile);
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Iterates over the cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }

    /// Locates every column in [`REQUIRED_COLUMNS`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingColumn`] naming the first absent column.
    pub fn require_columns(&self) -> Result<Schema, PipelineError> {
        let find = |name: &str| {
            self.column_index(name)
                .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
        };

        Ok(Schema {
            region: find(REGION_COLUMN)?,
            latitude: find(LATITUDE_COLUMN)?,
            longitude: find(LONGITUDE_COLUMN)?,
            significance: find(SIGNIFICANCE_COLUMN)?,
            date: find(DATE_COLUMN)?,
        })
    }

    pub fn records(&self, schema: &Schema) -> Vec<QuakeRecord> {
        self.rows
            .iter()
            .map(|row| {
                let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
                QuakeRecord {
                    region: cell(schema.region).to_string(),
                    latitude: parse_number(cell(schema.latitude)),
                    longitude: parse_number(cell(schema.longitude)),
                    significance: parse_number(cell(schema.significance)),
                    date: parse_date(cell(schema.date)),
                }
            })
            .collect()
    }
}

/// Parses a numeric cell. Empty, `NaN` and infinite values are missing.
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a date cell into a timestamp, or `None` if no known format matches.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(stripped) = UTC_SUFFIXES.iter().find_map(|sfx| raw.strip_suffix(sfx)) {
        return parse_date(stripped);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.naive_local());
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return parse_digits(raw);
    }

    None
}

/// Bare year ("1999") or compact date ("20230217").
fn parse_digits(raw: &str) -> Option<NaiveDateTime> {
    let date = match raw.len() {
        4 => NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1)?,
        8 => NaiveDate::from_ymd_opt(
            raw[..4].parse().ok()?,
            raw[4..6].parse().ok()?,
            raw[6..].parse().ok()?,
        )?,
        _ => return None,
    };
    date.and_hms_opt(0, 0, 0)
}
