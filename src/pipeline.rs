//! One dashboard pass: uploaded bytes in, render instructions or an error out.
//!
//! The pass holds no state between calls. Every stage runs once, and the first
//! error ends the pass. An upload with no rows for the target region is not
//! an error. It yields [`Outcome::NoRegionData`], which still carries the
//! preview and statistics of the unfiltered table.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analyzers::tier::bucket;
use crate::analyzers::timeline::year_counts;
use crate::analyzers::types::TierSizes;
use crate::error::PipelineError;
use crate::fetch::decode_body;
use crate::parser::parse_table;
use crate::region::{TARGET_REGION, filter_region};
use crate::render::{ChartSpec, MapSpec, build_chart, build_map};
use crate::stats::{
    ColumnStats, PREVIEW_ROWS, Preview, SignificanceSummary, describe, preview,
};

/// Sections computed over the whole upload, before the region filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub preview: Preview,
    pub describe: Vec<ColumnStats>,
}

/// Rows left out of a particular aggregate because of one bad field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DropCounts {
    /// Left out of every tier and of the map.
    pub missing_significance: usize,
    /// Left out of the year counts.
    pub unparseable_dates: usize,
    /// Scored, but no map marker could be placed.
    pub invalid_coordinates: usize,
}

/// Everything needed to draw the full dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub overview: Overview,
    pub region: &'static str,
    pub filtered_rows: usize,
    pub significance: Option<SignificanceSummary>,
    pub tiers: TierSizes,
    pub map: MapSpec,
    pub chart: ChartSpec,
    pub drops: DropCounts,
}

/// Shown when the upload has no rows for the target region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub overview: Overview,
    pub region: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Rendered(Dashboard),
    NoRegionData(Notice),
}

impl Outcome {
    pub fn overview(&self) -> &Overview {
        match self {
            Outcome::Rendered(d) => &d.overview,
            Outcome::NoRegionData(n) => &n.overview,
        }
    }
}

/// Runs the whole dashboard pipeline over one upload.
///
/// # Errors
///
/// Returns a [`PipelineError`] if the body cannot be decompressed, is not
/// well-formed UTF-8 CSV, or lacks one of the required columns.
#[tracing::instrument(skip(body), fields(bytes = body.len()))]
pub fn run(body: &[u8]) -> Result<Outcome, PipelineError> {
    let decoded = decode_body(body)?;
    let table = parse_table(&decoded)?;
    let schema = table.require_columns()?;
    info!(rows = table.rows.len(), columns = table.headers.len(), "Table parsed");

    let overview = Overview {
        preview: preview(&table, PREVIEW_ROWS),
        describe: describe(&table),
    };

    let filtered = filter_region(table.records(&schema), TARGET_REGION);
    if filtered.is_empty() {
        warn!(region = TARGET_REGION, "No rows for region");
        return Ok(Outcome::NoRegionData(Notice {
            overview,
            region: TARGET_REGION,
            message: format!("No data found for {TARGET_REGION}."),
        }));
    }
    info!(region = TARGET_REGION, filtered = filtered.len(), "Region filter applied");

    let significance = SignificanceSummary::from_records(&filtered);
    let buckets = bucket(&filtered);
    let map = build_map(&buckets);
    let timeline = year_counts(&filtered);
    let chart = build_chart(&timeline, TARGET_REGION);

    let drops = DropCounts {
        missing_significance: buckets.unscored,
        unparseable_dates: timeline.undated,
        invalid_coordinates: map.skipped,
    };
    debug!(
        missing_significance = drops.missing_significance,
        unparseable_dates = drops.unparseable_dates,
        invalid_coordinates = drops.invalid_coordinates,
        "Per-field drops"
    );

    let tiers = buckets.sizes();
    info!(
        low = tiers.low,
        medium = tiers.medium,
        high = tiers.high,
        years = timeline.counts.len(),
        "Dashboard computed"
    );

    Ok(Outcome::Rendered(Dashboard {
        overview,
        region: TARGET_REGION,
        filtered_rows: filtered.len(),
        significance,
        tiers,
        map,
        chart,
        drops,
    }))
}
