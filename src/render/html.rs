//! Self-contained HTML page for a dashboard pass.
//!
//! The map is drawn by Leaflet and the chart by Plotly, both loaded from a
//! CDN. Render instructions are embedded as JSON and every piece of uploaded
//! text is HTML-escaped.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::pipeline::{Dashboard, Notice, Outcome, Overview};
use crate::stats::ColumnStats;

const PAGE_TITLE: &str = "Earthquake Analysis for France";

const HEAD_ASSETS: &str = r#"<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>"#;

const STYLE: &str = r#"<style>
body { font-family: sans-serif; margin: 2rem auto; max-width: 1100px; color: #222; }
table { border-collapse: collapse; font-size: 0.85rem; margin-bottom: 1.5rem; }
th, td { border: 1px solid #ccc; padding: 0.25rem 0.5rem; text-align: right; }
th { background: #f2f2f2; }
.banner { padding: 0.75rem 1rem; border-radius: 4px; margin: 1rem 0; }
.success { background: #e6f4ea; color: #1e4620; }
.warning { background: #fff4e5; color: #663c00; }
.error { background: #fdecea; color: #611a15; }
#map { height: 520px; margin-bottom: 1.5rem; }
</style>"#;

/// Map and chart drawing, reading `MAP_SPEC` and `CHART_SPEC`.
///
/// Plotly.js only takes template objects, not names, so the dark theme named
/// by `CHART_SPEC.template` is applied through explicit layout colours.
const DRAW_SCRIPT: &str = r#"<script>
const map = L.map('map').setView(MAP_SPEC.center, MAP_SPEC.zoom);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);
const overlays = {};
for (const layer of MAP_SPEC.layers) {
  const group = L.featureGroup();
  for (const m of layer.markers) {
    L.circleMarker([m.lat, m.lon], {
      radius: layer.radius, color: layer.color, fill: true,
      fillColor: layer.color, fillOpacity: layer.fill_opacity
    }).bindTooltip('significance ' + m.significance).addTo(group);
  }
  group.addTo(map);
  overlays[layer.name] = group;
}
if (MAP_SPEC.layer_control) { L.control.layers(null, overlays).addTo(map); }
Plotly.newPlot('chart', [{
  type: CHART_SPEC.kind,
  x: CHART_SPEC.points.map(p => p.year),
  y: CHART_SPEC.points.map(p => p.count)
}], {
  title: CHART_SPEC.title,
  paper_bgcolor: '#111', plot_bgcolor: '#111', font: { color: '#eee' },
  xaxis: { title: CHART_SPEC.x_label },
  yaxis: { title: CHART_SPEC.y_label }
});
</script>"#;

/// Renders either outcome of a pipeline pass.
pub fn render_outcome(source_name: &str, outcome: &Outcome) -> Result<String> {
    match outcome {
        Outcome::Rendered(dashboard) => render_page(source_name, dashboard),
        Outcome::NoRegionData(notice) => Ok(render_notice(source_name, notice)),
    }
}

/// Full dashboard: overview, significance range, map and chart.
pub fn render_page(source_name: &str, dashboard: &Dashboard) -> Result<String> {
    let mut body = String::new();
    write_overview(&mut body, source_name, &dashboard.overview);

    let _ = writeln!(
        body,
        "<h2>Earthquake statistics for {}</h2>",
        escape(dashboard.region)
    );
    match dashboard.significance {
        Some(s) => {
            let _ = writeln!(body, "<p>Maximum significance: {}</p>", s.max);
            let _ = writeln!(body, "<p>Minimum significance: {}</p>", s.min);
        }
        None => body.push_str("<p>No significance values available.</p>\n"),
    }

    let _ = writeln!(
        body,
        "<h2>Earthquake map for {}</h2>\n<div id=\"map\"></div>",
        escape(dashboard.region)
    );
    body.push_str("<h2>Earthquake timeline</h2>\n<div id=\"chart\"></div>\n");

    let _ = writeln!(
        body,
        "<script>\nconst MAP_SPEC = {};\nconst CHART_SPEC = {};\n</script>",
        script_json(&dashboard.map)?,
        script_json(&dashboard.chart)?
    );
    body.push_str(DRAW_SCRIPT);

    Ok(page(&body))
}

/// Overview plus a warning that the region filter matched nothing.
pub fn render_notice(source_name: &str, notice: &Notice) -> String {
    let mut body = String::new();
    write_overview(&mut body, source_name, &notice.overview);
    let _ = writeln!(
        body,
        "<h2>Earthquake statistics for {}</h2>\n<div class=\"banner warning\">{}</div>",
        escape(notice.region),
        escape(&notice.message)
    );
    page(&body)
}

/// Single error banner; nothing from the upload is shown.
pub fn render_error(source_name: &str, message: &str) -> String {
    let body = format!(
        "<p>Source: {}</p>\n<div class=\"banner error\">Error while reading the file: {}</div>\n",
        escape(source_name),
        escape(message)
    );
    page(&body)
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{PAGE_TITLE}</title>\n{HEAD_ASSETS}\n{STYLE}\n</head>\n<body>\n<h1>{PAGE_TITLE}</h1>\n{body}</body>\n</html>\n"
    )
}

fn write_overview(out: &mut String, source_name: &str, overview: &Overview) {
    let _ = writeln!(
        out,
        "<p>Source: {}</p>\n<div class=\"banner success\">File loaded successfully ({} rows).</div>",
        escape(source_name),
        overview.preview.total_rows
    );

    out.push_str("<h2>Data preview</h2>\n<table>\n<tr>");
    for header in &overview.preview.headers {
        let _ = write!(out, "<th>{}</th>", escape(header));
    }
    out.push_str("</tr>\n");
    for row in &overview.preview.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");

    out.push_str("<h2>Descriptive statistics</h2>\n");
    write_describe(out, &overview.describe);
}

fn write_describe(out: &mut String, stats: &[ColumnStats]) {
    if stats.is_empty() {
        out.push_str("<p>No numeric columns.</p>\n");
        return;
    }

    out.push_str("<table>\n<tr><th></th>");
    for s in stats {
        let _ = write!(out, "<th>{}</th>", escape(&s.column));
    }
    out.push_str("</tr>\n");

    let rows: [(&str, fn(&ColumnStats) -> String); 8] = [
        ("count", |s| s.count.to_string()),
        ("mean", |s| fmt_stat(s.mean)),
        ("std", |s| s.std.map(fmt_stat).unwrap_or_else(|| "NaN".to_string())),
        ("min", |s| fmt_stat(s.min)),
        ("25%", |s| fmt_stat(s.p25)),
        ("50%", |s| fmt_stat(s.p50)),
        ("75%", |s| fmt_stat(s.p75)),
        ("max", |s| fmt_stat(s.max)),
    ];
    for (label, value) in rows {
        let _ = write!(out, "<tr><th>{label}</th>");
        for s in stats {
            let _ = write!(out, "<td>{}</td>", value(s));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
}

fn fmt_stat(v: f64) -> String {
    format!("{v:.6}")
}

/// Serializes for inline `<script>` use; `</` is split so it cannot end the tag.
fn script_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::run;

    const CSV: &str = "date,state,latitude,longitude,significance\n\
                       2001-01-01,France,45.0,6.0,10\n\
                       2002-06-01,France,43.0,5.0,160\n";

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>\"Q&A\"</b> it's"),
            "&lt;b&gt;&quot;Q&amp;A&quot;&lt;/b&gt; it&#39;s"
        );
    }

    #[test]
    fn test_render_page_contains_sections_in_order() {
        let outcome = run(CSV.as_bytes()).unwrap();
        let html = render_outcome("quakes.csv", &outcome).unwrap();

        let order = [
            "quakes.csv",
            "Data preview",
            "Descriptive statistics",
            "Maximum significance: 160",
            "Minimum significance: 10",
            "id=\"map\"",
            "id=\"chart\"",
        ];
        let mut last = 0;
        for needle in order {
            let pos = html[last..]
                .find(needle)
                .unwrap_or_else(|| panic!("{needle} missing or out of order"));
            last += pos;
        }
        assert!(html.contains("\"Significance >= 150\""));
        assert!(html.contains("plotly_dark"));
        assert!(html.contains("paper_bgcolor: '#111'"));
        assert!(!html.contains("template: CHART_SPEC.template"));
    }

    #[test]
    fn test_render_notice_has_no_map() {
        let csv = "date,state,latitude,longitude,significance\n2001-01-01,Spain,40,-3,10\n";
        let outcome = run(csv.as_bytes()).unwrap();
        let html = render_outcome("spain.csv", &outcome).unwrap();

        assert!(html.contains("banner warning"));
        assert!(html.contains("No data found for France."));
        assert!(!html.contains("id=\"map\""));
        assert!(!html.contains("id=\"chart\""));
    }

    #[test]
    fn test_render_error_escapes_message() {
        let html = render_error("bad.csv", "required column '<state>' not found");

        assert!(html.contains("banner error"));
        assert!(html.contains("&lt;state&gt;"));
        assert!(!html.contains("Data preview"));
    }

    #[test]
    fn test_script_json_splits_closing_tags() {
        let json = script_json(&"</script>").unwrap();
        assert!(!json.contains("</"));
    }
}
