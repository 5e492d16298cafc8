//! Prometheus metrics.

use crate::config::MetricsSettings;
use crate::{Error, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Metrics configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,
}

impl MetricsConfig {
    /// Builds metrics configuration from config settings.
    #[must_use]
    pub fn from_settings(settings: &MetricsSettings, requested: bool) -> Self {
        Self {
            enabled: requested || settings.enabled.unwrap_or(false),
        }
    }
}

/// Installs the Prometheus recorder as the global `metrics` recorder.
///
/// Returns `None` when metrics are disabled; the `metrics` macros are then
/// no-ops.
pub fn install_prometheus(config: MetricsConfig) -> Result<Option<PrometheusHandle>> {
    if !config.enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| Error::OperationFailed {
            operation: "metrics_recorder_install".to_string(),
            cause: e.to_string(),
        })?;

    Ok(Some(handle))
}
