use serde::Serialize;

use crate::analyzers::utility::{mean, quantile, sample_stddev};
use crate::parser::{QuakeRecord, Table, parse_number};

/// Rows shown in the data preview.
pub const PREVIEW_ROWS: usize = 5;

/// First rows of the uploaded table, shown before any filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Smallest and largest significance among the filtered records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignificanceSummary {
    pub min: f64,
    pub max: f64,
}

impl SignificanceSummary {
    /// Returns `None` when no record carries a significance value.
    pub fn from_records(records: &[QuakeRecord]) -> Option<Self> {
        records
            .iter()
            .filter_map(|r| r.significance)
            .fold(None, |acc, s| match acc {
                None => Some(SignificanceSummary { min: s, max: s }),
                Some(SignificanceSummary { min, max }) => Some(SignificanceSummary {
                    min: min.min(s),
                    max: max.max(s),
                }),
            })
    }
}

pub fn preview(table: &Table, n: usize) -> Preview {
    Preview {
        headers: table.headers.clone(),
        rows: table.rows.iter().take(n).cloned().collect(),
        total_rows: table.rows.len(),
    }
}

/// Computes count, mean, std, min, quartiles and max for every numeric column.
///
/// A column is numeric when it has at least one value and every non-empty
/// cell parses as a number. Empty cells are skipped, like missing values.
pub fn describe(table: &Table) -> Vec<ColumnStats> {
    table
        .headers
        .iter()
        .enumerate()
        .filter_map(|(index, name)| describe_column(table, index, name))
        .collect()
}

fn describe_column(table: &Table, index: usize, name: &str) -> Option<ColumnStats> {
    let mut values = Vec::new();
    for cell in table.column(index).map(str::trim) {
        if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
            continue;
        }
        values.push(parse_number(cell)?);
    }

    if values.is_empty() {
        return None;
    }

    values.sort_by(f64::total_cmp);
    let avg = mean(&values);

    Some(ColumnStats {
        column: name.to_string(),
        count: values.len(),
        mean: avg,
        std: sample_stddev(&values, avg),
        min: values[0],
        p25: quantile(&values, 0.25),
        p50: quantile(&values, 0.5),
        p75: quantile(&values, 0.75),
        max: values[values.len() - 1],
    })
}
