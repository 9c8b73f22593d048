//! Environment-driven settings for the CLI.

use std::path::{Path, PathBuf};

const DEFAULT_LOG_FILE: &str = "logs/seismic_dashboard.log";
const DEFAULT_STDERR_DIRECTIVE: &str = "info";
const DEFAULT_JSON_DIRECTIVE: &str = "debug";

/// Where and how verbosely to log.
///
/// | Variable        | Default                       |
/// |-----------------|-------------------------------|
/// | `LOG_FILE_PATH` | `logs/seismic_dashboard.log`  |
/// | `RUST_LOG`      | `info`                        |
/// | `RUST_LOG_JSON` | `debug`                       |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub file_path: PathBuf,
    pub stderr_filter: String,
    pub json_filter: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        LogConfig {
            file_path: non_empty("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            stderr_filter: non_empty("RUST_LOG")
                .unwrap_or_else(|| DEFAULT_STDERR_DIRECTIVE.to_string()),
            json_filter: non_empty("RUST_LOG_JSON")
                .unwrap_or_else(|| DEFAULT_JSON_DIRECTIVE.to_string()),
        }
    }

    pub fn log_dir(&self) -> &Path {
        self.file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    pub fn log_file_name(&self) -> &str {
        self.file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("seismic_dashboard.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> LogConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LogConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]);
        assert_eq!(c.log_dir(), Path::new("logs"));
        assert_eq!(c.log_file_name(), "seismic_dashboard.log");
        assert_eq!(c.stderr_filter, "info");
        assert_eq!(c.json_filter, "debug");
    }

    #[test]
    fn test_overrides() {
        let c = config(&[
            ("LOG_FILE_PATH", "/var/log/quakes/run.log"),
            ("RUST_LOG", "seismic_dashboard=trace"),
            ("RUST_LOG_JSON", ""),
        ]);
        assert_eq!(c.log_dir(), Path::new("/var/log/quakes"));
        assert_eq!(c.log_file_name(), "run.log");
        assert_eq!(c.stderr_filter, "seismic_dashboard=trace");
        assert_eq!(c.json_filter, "debug");
    }

    #[test]
    fn test_bare_file_name_logs_to_current_dir() {
        let c = config(&[("LOG_FILE_PATH", "quakes.log")]);
        assert_eq!(c.log_dir(), Path::new("."));
    }
}
