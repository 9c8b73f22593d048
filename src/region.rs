//! Restricts records to the single country the dashboard covers.

use crate::parser::QuakeRecord;

pub const TARGET_REGION: &str = "France";

/// Keeps records whose region equals `region` exactly (case-sensitive).
pub fn filter_region(records: Vec<QuakeRecord>, region: &str) -> Vec<QuakeRecord> {
    records.into_iter().filter(|r| r.region == region).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str) -> QuakeRecord {
        QuakeRecord {
            region: region.to_string(),
            latitude: Some(46.0),
            longitude: Some(2.0),
            significance: Some(10.0),
            date: None,
        }
    }

    #[test]
    fn test_filter_keeps_exact_matches() {
        let records = vec![record("France"), record("Italy"), record("France")];
        let filtered = filter_region(records, TARGET_REGION);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.region == "France"));
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let records = vec![record("france"), record("FRANCE"), record("France ")];
        assert!(filter_region(records, TARGET_REGION).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = vec![record("France"), record("Spain"), record("France")];
        let once = filter_region(records, TARGET_REGION);
        let twice = filter_region(once.clone(), TARGET_REGION);

        assert_eq!(once, twice);
    }
}
