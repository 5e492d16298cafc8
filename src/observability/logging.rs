//! Structured logging.

use crate::config::LoggingSettings;
use std::path::PathBuf;

/// Default filter directive when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, falling back to `Pretty` for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file; stderr otherwise.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds logging configuration from settings.
    ///
    /// The filter is chosen as: `--verbose` (`debug`), then `LEADMATCH_LOG`,
    /// then `RUST_LOG`, then the configured level, then `warn`.
    #[must_use]
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        let filter = if verbose {
            "debug".to_string()
        } else {
            env_filter_directive()
                .or_else(|| settings.level.clone())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
        };

        Self {
            filter,
            format: settings
                .format
                .as_deref()
                .map(LogFormat::parse)
                .unwrap_or_default(),
            file: settings.file.clone(),
        }
    }
}

fn env_filter_directive() -> Option<String> {
    ["LEADMATCH_LOG", "RUST_LOG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
