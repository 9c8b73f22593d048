use serde::Serialize;
use tracing::debug;

use crate::analyzers::types::TierBuckets;
use crate::parser::QuakeRecord;

/// Lower bound (inclusive) of the medium tier.
pub const MEDIUM_THRESHOLD: f64 = 50.0;
/// Lower bound (inclusive) of the high tier.
pub const HIGH_THRESHOLD: f64 = 150.0;

/// Severity bucket derived from an event's significance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    pub const ALL: [SeverityTier; 3] = [SeverityTier::Low, SeverityTier::Medium, SeverityTier::High];

    /// Maps a significance score onto its tier.
    ///
    /// | Range          | Tier   |
    /// |----------------|--------|
    /// | < 50           | Low    |
    /// | >= 50, < 150   | Medium |
    /// | >= 150         | High   |
    pub fn classify(significance: f64) -> Self {
        match significance {
            s if s >= HIGH_THRESHOLD => SeverityTier::High,
            s if s >= MEDIUM_THRESHOLD => SeverityTier::Medium,
            _ => SeverityTier::Low,
        }
    }
}

/// Splits records into the three tiers. Records without a significance are
/// counted in [`TierBuckets::unscored`] and placed in no tier.
pub fn bucket(records: &[QuakeRecord]) -> TierBuckets {
    let mut buckets = TierBuckets::default();

    for record in records {
        let Some(significance) = record.significance else {
            buckets.unscored += 1;
            continue;
        };

        let target = match SeverityTier::classify(significance) {
            SeverityTier::Low => &mut buckets.low,
            SeverityTier::Medium => &mut buckets.medium,
            SeverityTier::High => &mut buckets.high,
        };
        target.push(record.clone());
    }

    let sizes = buckets.sizes();
    debug!(
        low = sizes.low,
        medium = sizes.medium,
        high = sizes.high,
        unscored = buckets.unscored,
        "Records bucketed by significance"
    );

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(significance: Option<f64>) -> QuakeRecord {
        QuakeRecord {
            region: "France".to_string(),
            latitude: Some(46.0),
            longitude: Some(2.0),
            significance,
            date: None,
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(SeverityTier::classify(-5.0), SeverityTier::Low);
        assert_eq!(SeverityTier::classify(0.0), SeverityTier::Low);
        assert_eq!(SeverityTier::classify(49.999), SeverityTier::Low);
        assert_eq!(SeverityTier::classify(50.0), SeverityTier::Medium);
        assert_eq!(SeverityTier::classify(149.999), SeverityTier::Medium);
        assert_eq!(SeverityTier::classify(150.0), SeverityTier::High);
        assert_eq!(SeverityTier::classify(2_000.0), SeverityTier::High);
    }

    #[test]
    fn test_bucket_one_per_tier() {
        let records = vec![scored(Some(10.0)), scored(Some(60.0)), scored(Some(200.0))];
        let buckets = bucket(&records);
        let sizes = buckets.sizes();

        assert_eq!((sizes.low, sizes.medium, sizes.high), (1, 1, 1));
        assert_eq!(buckets.unscored, 0);
    }

    #[test]
    fn test_bucket_partitions_scored_records() {
        let values = [None, Some(0.0), Some(50.0), Some(149.0), Some(150.0), None, Some(49.0)];
        let records: Vec<_> = values.iter().map(|v| scored(*v)).collect();
        let buckets = bucket(&records);

        assert_eq!(buckets.sizes().total() + buckets.unscored, records.len());
        assert_eq!(buckets.unscored, 2);
        for tier in SeverityTier::ALL {
            for record in buckets.get(tier) {
                let s = record.significance.unwrap();
                assert_eq!(SeverityTier::classify(s), tier);
            }
        }
        assert_eq!(buckets.medium.len(), 2);
        assert_eq!(buckets.high.len(), 1);
    }

    #[test]
    fn test_bucket_empty() {
        assert_eq!(bucket(&[]), TierBuckets::default());
    }
}
