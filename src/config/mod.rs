//! Configuration management.
//!
//! Settings are layered, later layers winning:
//! 1. Built-in defaults
//! 2. A TOML file (`--config`, else `LEADMATCH_CONFIG_PATH`, else the
//!    platform config dir, e.g. `~/.config/leadmatch/config.toml`)
//! 3. Environment variables (`LEADMATCH_DEDUP_*`, `LEADMATCH_LOG_*`, `LEADMATCH_METRICS_ENABLED`)
//! 4. Command-line flags, applied by the binary
//!
//! ```toml
//! [dedup]
//! similarity_threshold = 0.92
//! fuzzy_attorney_matching = true
//! fuzzy_firm_matching = false
//!
//! [logging]
//! level = "info"
//! format = "json"
//! file = "/var/log/leadmatch.log"
//!
//! [metrics]
//! enabled = true
//! ```

use crate::services::deduplication::{DeduplicationConfig, parse_threshold};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "LEADMATCH_CONFIG_PATH";

/// Main configuration for leadmatch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadmatchConfig {
    /// Deduplication policy.
    pub dedup: DeduplicationConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Metrics settings.
    pub metrics: MetricsSettings,
    /// File the configuration was read from, if any.
    pub source: Option<PathBuf>,
}

/// Logging section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `"info"` or `"leadmatch=debug"`.
    pub level: Option<String>,
    /// Output format: `"pretty"` or `"json"`.
    pub format: Option<String>,
    /// Log file; logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

/// Metrics section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsSettings {
    /// Whether the Prometheus recorder is installed.
    pub enabled: Option<bool>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Deduplication section.
    pub dedup: Option<ConfigFileDedup>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
    /// Metrics section.
    pub metrics: Option<MetricsSettings>,
}

/// Deduplication section in config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFileDedup {
    /// Similarity threshold in `[0, 1]`.
    pub similarity_threshold: Option<f64>,
    /// Fuzzy attorney matching.
    pub fuzzy_attorney_matching: Option<bool>,
    /// Fuzzy firm matching.
    pub fuzzy_firm_matching: Option<bool>,
}

impl LeadmatchConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the configuration for a run.
    ///
    /// An explicit path (or `LEADMATCH_CONFIG_PATH`) must exist and parse.
    /// Without one, the default location is tried and silently skipped when
    /// missing. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };

        Ok(config.with_env_overrides())
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let mut config = Self::from_toml_str(&contents)?;
        config.source = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML, names unknown keys, or
    /// carries a threshold outside `[0, 1]`.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Uses the platform config dir (`~/.config/leadmatch/config.toml` on
    /// Linux). Returns defaults if no usable file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        Self::load_from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
            Self::default()
        })
    }

    /// Converts a `ConfigFile` to `LeadmatchConfig`.
    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dedup) = file.dedup {
            if let Some(threshold) = dedup.similarity_threshold {
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(Error::InvalidInput(format!(
                        "dedup.similarity_threshold must be within [0, 1], got {threshold}"
                    )));
                }
                config.dedup = config.dedup.with_similarity_threshold(threshold);
            }
            if let Some(v) = dedup.fuzzy_attorney_matching {
                config.dedup.fuzzy_attorney_matching = v;
            }
            if let Some(v) = dedup.fuzzy_firm_matching {
                config.dedup.fuzzy_firm_matching = v;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }
        if let Some(metrics) = file.metrics {
            config.metrics = metrics;
        }

        Ok(config)
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.dedup = self.dedup.with_env_overrides();

        if let Some(level) = non_empty_env("LEADMATCH_LOG_LEVEL") {
            self.logging.level = Some(level);
        }
        if let Some(format) = non_empty_env("LEADMATCH_LOG_FORMAT") {
            self.logging.format = Some(format);
        }
        if let Some(file) = non_empty_env("LEADMATCH_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
        if let Some(enabled) = non_empty_env("LEADMATCH_METRICS_ENABLED") {
            self.metrics.enabled = Some(matches!(
                enabled.to_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            ));
        }

        self
    }

    /// Overrides the similarity threshold from a command-line value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a number in `[0, 1]`.
    pub fn with_threshold_arg(mut self, value: &str) -> Result<Self> {
        let threshold = parse_threshold(value).ok_or_else(|| {
            Error::InvalidInput(format!(
                "threshold must be a number within [0, 1], got '{value}'"
            ))
        })?;
        self.dedup = self.dedup.with_similarity_threshold(threshold);
        Ok(self)
    }
}

/// Returns the default config file location, if a home directory is known.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("leadmatch").join("config.toml"))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
