//! CLI entry point for the seismic dashboard.
//!
//! Loads an earthquake CSV from a file or URL, runs one dashboard pass and
//! writes the resulting page, or logs a summary of it.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use seismic_dashboard::config::LogConfig;
use seismic_dashboard::fetch::{BasicClient, Upload, load_source};
use seismic_dashboard::output::{DocumentFormat, print_json, print_pretty, write_document};
use seismic_dashboard::pipeline::{Outcome, run};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "seismic_dashboard")]
#[command(about = "Earthquake dashboard for France from a CSV upload", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard for a CSV file or URL
    Render {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Where to write the render document
        #[arg(short, long, default_value = "dashboard.html")]
        output: String,

        /// Document format
        #[arg(short, long, value_enum, default_value_t = DocumentFormat::Html)]
        format: DocumentFormat,
    },
    /// Log significance range, tier sizes and yearly counts without rendering
    Summary {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Also log the full outcome as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging(&LogConfig::from_env())?;

    let cli = Cli::parse();
    let client = BasicClient::new();

    match cli.command {
        Commands::Render {
            source,
            output,
            format,
        } => {
            let (name, result) = match load_source(&client, &source).await {
                Ok(Upload { name, body }) => (name, run(&body)),
                Err(e) => (source.clone(), Err(e)),
            };

            write_document(&output, format, &name, &result)?;

            match result {
                Ok(Outcome::Rendered(_)) => info!(output = %output, "Dashboard rendered"),
                Ok(Outcome::NoRegionData(notice)) => {
                    warn!(output = %output, region = notice.region, "Rendered without map or chart")
                }
                Err(e) => {
                    error!(output = %output, error = %e, "Dashboard pass failed");
                    bail!(e);
                }
            }
        }
        Commands::Summary { source, json } => {
            let upload = load_source(&client, &source).await?;
            let outcome = run(&upload.body)?;

            print_pretty(&outcome);
            if json {
                print_json(&outcome)?;
            }
            log_summary(&upload.name, &outcome);
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging(config: &LogConfig) -> Result<WorkerGuard> {
    let file_appender =
        tracing_appender::rolling::daily(config.log_dir(), config.log_file_name());
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_new(&config.stderr_filter)?);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::try_new(&config.json_filter)?);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

fn log_summary(source_name: &str, outcome: &Outcome) {
    let preview = &outcome.overview().preview;
    info!(
        source = source_name,
        rows = preview.total_rows,
        columns = preview.headers.len(),
        "Upload summary"
    );

    let dashboard = match outcome {
        Outcome::Rendered(d) => d,
        Outcome::NoRegionData(notice) => {
            warn!(region = notice.region, "{}", notice.message);
            return;
        }
    };

    match dashboard.significance {
        Some(s) => info!(min = s.min, max = s.max, "Significance range"),
        None => warn!("No significance values"),
    }

    info!(
        region = dashboard.region,
        filtered = dashboard.filtered_rows,
        low = dashboard.tiers.low,
        medium = dashboard.tiers.medium,
        high = dashboard.tiers.high,
        "Tier sizes"
    );

    for point in &dashboard.chart.points {
        info!(year = point.year, count = point.count, "Year");
    }

    info!(
        missing_significance = dashboard.drops.missing_significance,
        unparseable_dates = dashboard.drops.unparseable_dates,
        invalid_coordinates = dashboard.drops.invalid_coordinates,
        "Dropped rows"
    );
}
