//! Loads an upload from a local path or an HTTP(S) URL.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;
use bytes::Bytes;
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::PipelineError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Raw bytes of one uploaded file plus the name shown on the page.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub body: Bytes,
}

const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let resp = client.get(url.parse()?).await?;
    Ok(resp.bytes().await?.to_vec())
}

/// True for `http://` and `https://` sources; everything else is a local path.
pub fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    URL_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Reads `source` from disk, or fetches it when it looks like a URL.
#[tracing::instrument(skip(client))]
pub async fn load_source<C: HttpClient>(client: &C, source: &str) -> Result<Upload, PipelineError> {
    let body = if is_remote(source) {
        fetch_bytes(client, source)
            .await
            .map_err(|e| PipelineError::Fetch {
                source_name: source.to_string(),
                cause: std::io::Error::other(e),
            })?
    } else {
        std::fs::read(source).map_err(|e| PipelineError::Fetch {
            source_name: source.to_string(),
            cause: e,
        })?
    };
    debug!(bytes = body.len(), "Source loaded");

    Ok(Upload {
        name: display_name(source),
        body: Bytes::from(body),
    })
}

/// Inflates gzip-compressed bodies; anything else is returned as-is.
pub fn decode_body(body: &[u8]) -> Result<Vec<u8>, PipelineError> {
    if !body.starts_with(&GZIP_MAGIC) {
        return Ok(body.to_vec());
    }

    let mut decoded = Vec::new();
    GzDecoder::new(body)
        .read_to_end(&mut decoded)
        .map_err(PipelineError::Decode)?;
    debug!(compressed = body.len(), decoded = decoded.len(), "Gzip body inflated");
    Ok(decoded)
}

fn display_name(source: &str) -> String {
    let trimmed = source.split(['?', '#']).next().unwrap_or(source);
    Path::new(trimmed)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(source)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::env;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_decode_plain_body_unchanged() {
        let body = b"state,latitude\nFrance,1.0\n";
        assert_eq!(decode_body(body).unwrap(), body.to_vec());
    }

    #[test]
    fn test_decode_gzip_body() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"state\nFrance\n").unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(decode_body(&compressed).unwrap(), b"state\nFrance\n".to_vec());
    }

    #[test]
    fn test_decode_corrupt_gzip_fails() {
        let body = [0x1f, 0x8b, 0x00, 0x01, 0x02];
        assert!(matches!(decode_body(&body), Err(PipelineError::Decode(_))));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("data/quakes.csv"), "quakes.csv");
        assert_eq!(
            display_name("https://example.org/files/quakes.csv?dl=1"),
            "quakes.csv"
        );
        assert_eq!(display_name("quakes.csv"), "quakes.csv");
    }

    struct RecordingClient {
        seen: std::sync::Mutex<Vec<(reqwest::Method, String)>>,
        inner: BasicClient,
    }

    #[async_trait::async_trait]
    impl HttpClient for RecordingClient {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            self.seen
                .lock()
                .unwrap()
                .push((req.method().clone(), req.url().to_string()));
            self.inner.execute(req).await
        }
    }

    #[tokio::test]
    async fn test_fetch_bytes_issues_get() {
        let client = RecordingClient {
            seen: std::sync::Mutex::new(Vec::new()),
            inner: BasicClient::new(),
        };

        // nothing listens on port 0, so the request fails after being issued
        let result = fetch_bytes(&client, "http://127.0.0.1:0/quakes.csv").await;

        assert!(result.is_err());
        let seen = client.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(reqwest::Method::GET, "http://127.0.0.1:0/quakes.csv".to_string())]
        );
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("http://example.org/quakes.csv"));
        assert!(is_remote("HTTPS://example.org/quakes.csv"));
        assert!(!is_remote("http_export.csv"));
        assert!(!is_remote("https_dump/quakes.csv"));
        assert!(!is_remote("/data/quakes.csv"));
    }

    #[tokio::test]
    async fn test_load_source_from_file() {
        let path = format!("{}/seismic_dashboard_load.csv", env::temp_dir().display());
        fs::write(&path, "state\nFrance\n").unwrap();

        let upload = load_source(&BasicClient::new(), &path).await.unwrap();
        assert_eq!(upload.name, "seismic_dashboard_load.csv");
        assert_eq!(&upload.body[..], b"state\nFrance\n");

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_source_missing_file() {
        let result = load_source(&BasicClient::new(), "/nonexistent/quakes.csv").await;
        assert!(matches!(result, Err(PipelineError::Fetch { .. })));
    }
}
