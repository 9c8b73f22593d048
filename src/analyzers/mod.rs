//! Severity bucketing and per-year aggregation over the filtered records.

pub mod tier;
pub mod timeline;
pub mod types;
pub mod utility;
