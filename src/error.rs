//! Error taxonomy for a single dashboard pass.
//!
//! Every variant is terminal for the current upload. Per-field problems
//! (bad dates, missing significance) are not errors; they are counted in
//! [`crate::pipeline::DropCounts`] instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source could not be read from disk or fetched over HTTP.
    #[error("could not load source {source_name}: {cause}")]
    Fetch {
        source_name: String,
        #[source]
        cause: std::io::Error,
    },

    /// The body looked gzip-compressed but could not be inflated.
    #[error("could not decompress upload: {0}")]
    Decode(#[source] std::io::Error),

    /// Malformed CSV, e.g. a row with the wrong number of fields.
    #[error("malformed CSV: {0}")]
    Parse(String),

    /// The file is not valid UTF-8.
    #[error("file is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("file is empty or has no header row")]
    EmptyFile,

    #[error("required column '{0}' not found")]
    MissingColumn(String),
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Utf8 { .. } => PipelineError::Encoding(err.to_string()),
            _ => PipelineError::Parse(err.to_string()),
        }
    }
}
