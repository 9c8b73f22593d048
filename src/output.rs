//! Output formatting and persistence for dashboard passes.
//!
//! Supports pretty-printing, JSON logging, and writing the render document
//! (HTML page or JSON) to disk.

use anyhow::Result;
use clap::ValueEnum;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::PipelineError;
use crate::pipeline::Outcome;
use crate::render::html::{render_error, render_outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    /// Standalone page with Leaflet map and Plotly chart
    Html,
    /// Render instructions as JSON
    Json,
}

/// Logs an outcome using Rust's debug pretty-print format.
pub fn print_pretty(outcome: &Outcome) {
    debug!("{:#?}", outcome);
}

/// Logs an outcome as pretty-printed JSON.
pub fn print_json(outcome: &Outcome) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}

/// Renders a pipeline result, including the error banner for failed passes.
pub fn render_document(
    format: DocumentFormat,
    source_name: &str,
    result: &Result<Outcome, PipelineError>,
) -> Result<String> {
    let document = match (format, result) {
        (DocumentFormat::Html, Ok(outcome)) => render_outcome(source_name, outcome)?,
        (DocumentFormat::Html, Err(e)) => render_error(source_name, &e.to_string()),
        (DocumentFormat::Json, Ok(outcome)) => serde_json::to_string_pretty(outcome)?,
        (DocumentFormat::Json, Err(e)) => serde_json::to_string_pretty(&serde_json::json!({
            "status": "error",
            "message": e.to_string(),
        }))?,
    };
    Ok(document)
}

/// Writes the render document to `path`, creating parent directories as needed.
pub fn write_document(
    path: &str,
    format: DocumentFormat,
    source_name: &str,
    result: &Result<Outcome, PipelineError>,
) -> Result<()> {
    let document = render_document(format, source_name, result)?;

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &document)?;
    debug!(path, bytes = document.len(), ?format, "Render document written");

    Ok(())
}
