//! Observability and telemetry.

mod logging;
mod metrics;

pub use logging::{DEFAULT_LOG_FILTER, LogFormat, LoggingConfig};
pub use metrics::{MetricsConfig, install_prometheus};

use crate::config::LeadmatchConfig;
use crate::{Error, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Full observability configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Metrics configuration.
    pub metrics: MetricsConfig,
}

/// Options supplied on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Whether verbose output was requested.
    pub verbose: bool,
    /// Whether metrics were requested.
    pub metrics: bool,
}

impl ObservabilityConfig {
    /// Builds the observability configuration from loaded settings.
    #[must_use]
    pub fn from_config(config: &LeadmatchConfig, options: InitOptions) -> Self {
        Self {
            logging: LoggingConfig::from_settings(&config.logging, options.verbose),
            metrics: MetricsConfig::from_settings(&config.metrics, options.metrics),
        }
    }
}

/// Handle for observability runtime components.
#[derive(Debug, Default)]
pub struct ObservabilityHandle {
    metrics: Option<PrometheusHandle>,
}

impl ObservabilityHandle {
    /// Renders the collected metrics in Prometheus text format.
    ///
    /// Returns `None` when metrics are disabled.
    #[must_use]
    pub fn render_metrics(&self) -> Option<String> {
        self.metrics.as_ref().map(PrometheusHandle::render)
    }
}

/// Initializes logging and metrics for the process.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid, the log file cannot
/// be opened, or a global subscriber/recorder is already installed.
pub fn init(config: &ObservabilityConfig) -> Result<ObservabilityHandle> {
    let filter = EnvFilter::try_new(&config.logging.filter).map_err(|e| {
        Error::InvalidInput(format!(
            "invalid log filter '{}': {e}",
            config.logging.filter
        ))
    })?;

    match (&config.logging.file, config.logging.format) {
        (Some(log_file), LogFormat::Json) => {
            let writer = open_log_file(log_file)?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true),
                )
                .with(filter)
                .try_init()
                .map_err(init_error)?;
        },
        (Some(log_file), LogFormat::Pretty) => {
            let writer = open_log_file(log_file)?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true),
                )
                .with(filter)
                .try_init()
                .map_err(init_error)?;
        },
        (None, LogFormat::Json) => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true),
                )
                .with(filter)
                .try_init()
                .map_err(init_error)?;
        },
        (None, LogFormat::Pretty) => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(io::stderr)
                        .with_target(true),
                )
                .with(filter)
                .try_init()
                .map_err(init_error)?;
        },
    }

    let metrics = install_prometheus(config.metrics)?;

    tracing::debug!(
        filter = %config.logging.filter,
        format = ?config.logging.format,
        metrics = config.metrics.enabled,
        "Observability initialized"
    );

    Ok(ObservabilityHandle { metrics })
}

/// Thread-safe file writer for logging.
#[derive(Clone)]
struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?;
        guard.flush()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogFileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Opens a log file for appending.
fn open_log_file(path: &Path) -> Result<LogFileWriter> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
            operation: "create_log_dir".to_string(),
            cause: e.to_string(),
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::OperationFailed {
            operation: "open_log_file".to_string(),
            cause: format!("{}: {}", path.display(), e),
        })?;

    Ok(LogFileWriter {
        file: Arc::new(Mutex::new(file)),
    })
}

/// Helper to convert init errors.
#[allow(clippy::needless_pass_by_value)]
fn init_error(e: tracing_subscriber::util::TryInitError) -> Error {
    Error::OperationFailed {
        operation: "observability_init".to_string(),
        cause: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingSettings, MetricsSettings};

    #[test]
    fn test_config_from_settings() {
        let config = LeadmatchConfig {
            logging: LoggingSettings {
                level: Some("info".to_string()),
                format: Some("json".to_string()),
                file: None,
            },
            metrics: MetricsSettings {
                enabled: Some(true),
            },
            ..LeadmatchConfig::default()
        };

        let observability = ObservabilityConfig::from_config(
            &config,
            InitOptions {
                verbose: true,
                metrics: false,
            },
        );
        assert_eq!(observability.logging.filter, "debug");
        assert_eq!(observability.logging.format, LogFormat::Json);
        assert!(observability.metrics.enabled);
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = ObservabilityConfig {
            logging: LoggingConfig {
                filter: "leadmatch=notalevel".to_string(),
                ..LoggingConfig::default()
            },
            metrics: MetricsConfig::default(),
        };
        assert!(matches!(init(&config), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("leadmatch.log");

        let mut writer = open_log_file(&path).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
