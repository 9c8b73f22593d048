use serde::Serialize;

use crate::analyzers::types::{Timeline, YearCount};

pub const CHART_TEMPLATE: &str = "plotly_dark";

/// Bar chart of earthquake counts per year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: &'static str,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub template: &'static str,
    pub points: Vec<YearCount>,
}

pub fn build_chart(timeline: &Timeline, region: &str) -> ChartSpec {
    ChartSpec {
        kind: "bar",
        title: format!("Earthquakes per Year in {region}"),
        x_label: "Year",
        y_label: "Number of earthquakes",
        template: CHART_TEMPLATE,
        points: timeline.counts.clone(),
    }
}
