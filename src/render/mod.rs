//! Render instructions for the map and chart, plus the HTML page writer.

pub mod chart;
pub mod html;
pub mod map;

pub use chart::{ChartSpec, build_chart};
pub use map::{MapLayer, MapSpec, Marker, build_map};
