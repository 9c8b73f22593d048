use chrono::Datelike;
use std::collections::BTreeMap;
use tracing::debug;

use crate::analyzers::types::{Timeline, YearCount};
use crate::parser::QuakeRecord;

/// Counts records per calendar year. Records without a parsed date are
/// tallied in [`Timeline::undated`] and left out of the counts.
pub fn year_counts(records: &[QuakeRecord]) -> Timeline {
    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    let mut undated = 0;

    for record in records {
        match record.date {
            Some(date) => *per_year.entry(date.year()).or_default() += 1,
            None => undated += 1,
        }
    }

    debug!(years = per_year.len(), undated, "Records grouped by year");

    Timeline {
        counts: per_year
            .into_iter()
            .map(|(year, count)| YearCount { year, count })
            .collect(),
        undated,
    }
}
