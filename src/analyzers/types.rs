//! Data types produced by the tier and timeline analyzers.

use serde::Serialize;

use crate::analyzers::tier::SeverityTier;
use crate::parser::QuakeRecord;

/// Number of earthquakes that occurred in one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Per-year counts, ascending by year, plus how many records had no usable date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
    pub counts: Vec<YearCount>,
    pub undated: usize,
}

impl Timeline {
    /// Sum over all years, i.e. the number of records with a parsed date.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// Filtered records split by severity tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierBuckets {
    pub low: Vec<QuakeRecord>,
    pub medium: Vec<QuakeRecord>,
    pub high: Vec<QuakeRecord>,
    /// Records left out of every tier because significance was missing.
    pub unscored: usize,
}

impl TierBuckets {
    pub fn get(&self, tier: SeverityTier) -> &[QuakeRecord] {
        match tier {
            SeverityTier::Low => &self.low,
            SeverityTier::Medium => &self.medium,
            SeverityTier::High => &self.high,
        }
    }

    pub fn sizes(&self) -> TierSizes {
        TierSizes {
            low: self.low.len(),
            medium: self.medium.len(),
            high: self.high.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierSizes {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl TierSizes {
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}
