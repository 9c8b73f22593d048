use serde::Serialize;

use crate::analyzers::tier::SeverityTier;
use crate::analyzers::types::TierBuckets;
use crate::parser::QuakeRecord;

/// Map centre over metropolitan France, as (latitude, longitude).
pub const MAP_CENTER: [f64; 2] = [46.603354, 1.888334];
pub const MAP_ZOOM: u8 = 6;
pub const FILL_OPACITY: f64 = 0.6;

/// One circle marker on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub significance: f64,
}

/// A toggleable group of markers sharing one tier's style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    pub tier: SeverityTier,
    pub name: &'static str,
    pub radius: u32,
    pub color: &'static str,
    pub fill_opacity: f64,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSpec {
    pub center: [f64; 2],
    pub zoom: u8,
    pub layer_control: bool,
    pub layers: Vec<MapLayer>,
    /// Scored records that got no marker because of unusable coordinates.
    pub skipped: usize,
}

impl SeverityTier {
    pub fn layer_name(self) -> &'static str {
        match self {
            SeverityTier::Low => "Significance < 50",
            SeverityTier::Medium => "Significance 50-150",
            SeverityTier::High => "Significance >= 150",
        }
    }

    /// Marker radius in pixels.
    pub fn radius(self) -> u32 {
        match self {
            SeverityTier::Low => 2,
            SeverityTier::Medium => 5,
            SeverityTier::High => 8,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            SeverityTier::Low => "green",
            SeverityTier::Medium => "orange",
            SeverityTier::High => "red",
        }
    }
}

/// Builds one layer per tier, in ascending severity order.
pub fn build_map(buckets: &TierBuckets) -> MapSpec {
    let mut skipped = 0;

    let layers = SeverityTier::ALL
        .into_iter()
        .map(|tier| {
            let records = buckets.get(tier);
            let markers: Vec<Marker> = records.iter().filter_map(marker).collect();
            skipped += records.len() - markers.len();

            MapLayer {
                tier,
                name: tier.layer_name(),
                radius: tier.radius(),
                color: tier.color(),
                fill_opacity: FILL_OPACITY,
                markers,
            }
        })
        .collect();

    MapSpec {
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        layer_control: true,
        layers,
        skipped,
    }
}

fn marker(record: &QuakeRecord) -> Option<Marker> {
    let lat = record.latitude.filter(|v| (-90.0..=90.0).contains(v))?;
    let lon = record.longitude.filter(|v| (-180.0..=180.0).contains(v))?;

    Some(Marker {
        lat,
        lon,
        significance: record.significance?,
    })
}
