//! Deduplication configuration.
//!
//! This module defines the tunables of the decision policy: the fuzzy
//! similarity threshold and where fuzzy confirmation is allowed to fire.

use super::similarity::DEFAULT_SIMILARITY_THRESHOLD;

/// Configuration for the deduplication engine.
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `LEADMATCH_DEDUP_THRESHOLD` | f64 | `0.90` | Similarity needed for a fuzzy match |
/// | `LEADMATCH_DEDUP_FUZZY_ATTORNEY` | bool | `true` | Allow fuzzy attorney-name confirmation |
/// | `LEADMATCH_DEDUP_FUZZY_FIRM` | bool | `true` | Allow fuzzy firm-name matching across firms |
///
/// # Example
///
/// ```rust
/// use leadmatch::DeduplicationConfig;
///
/// let config = DeduplicationConfig::default();
/// assert!((config.similarity_threshold - 0.90).abs() < f64::EPSILON);
/// assert!(config.fuzzy_attorney_matching);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeduplicationConfig {
    /// Minimum similarity for a fuzzy match, in `[0, 1]`.
    pub similarity_threshold: f64,

    /// Whether attorney names on the same website or firm may match by similarity
    /// instead of exact normalized equality.
    pub fuzzy_attorney_matching: bool,

    /// Whether the firm + attorney signal may consider other firms whose
    /// normalized names are similar.
    pub fuzzy_firm_matching: bool,
}

impl DeduplicationConfig {
    /// Creates a new configuration from environment variables.
    ///
    /// Falls back to defaults for unset or unusable variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides on top of this configuration.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("LEADMATCH_DEDUP_THRESHOLD") {
            match parse_threshold(&v) {
                Some(threshold) => self.similarity_threshold = threshold,
                None => tracing::warn!(
                    value = %v,
                    "Ignoring LEADMATCH_DEDUP_THRESHOLD: expected a number in [0, 1]"
                ),
            }
        }

        if let Ok(v) = std::env::var("LEADMATCH_DEDUP_FUZZY_ATTORNEY") {
            self.fuzzy_attorney_matching = parse_flag(&v);
        }

        if let Ok(v) = std::env::var("LEADMATCH_DEDUP_FUZZY_FIRM") {
            self.fuzzy_firm_matching = parse_flag(&v);
        }

        self
    }

    /// Builder method to set the similarity threshold.
    ///
    /// Values outside `[0, 1]` are clamped.
    #[must_use]
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = if threshold.is_nan() {
            DEFAULT_SIMILARITY_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self
    }

    /// Builder method to enable or disable fuzzy attorney matching.
    #[must_use]
    pub const fn with_fuzzy_attorney_matching(mut self, enabled: bool) -> Self {
        self.fuzzy_attorney_matching = enabled;
        self
    }

    /// Builder method to enable or disable fuzzy firm matching.
    #[must_use]
    pub const fn with_fuzzy_firm_matching(mut self, enabled: bool) -> Self {
        self.fuzzy_firm_matching = enabled;
        self
    }

    /// Returns a configuration that only accepts exact normalized equality.
    #[must_use]
    pub const fn exact_only() -> Self {
        Self {
            similarity_threshold: 1.0,
            fuzzy_attorney_matching: false,
            fuzzy_firm_matching: false,
        }
    }
}

impl Default for DeduplicationConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            fuzzy_attorney_matching: true,
            fuzzy_firm_matching: true,
        }
    }
}

/// Parses a threshold, rejecting anything outside `[0, 1]`.
pub(crate) fn parse_threshold(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|t| (0.0..=1.0).contains(t))
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < f64::EPSILON
    }

    #[test]
    fn test_default_config() {
        let config = DeduplicationConfig::default();

        assert!(approx_eq(config.similarity_threshold, 0.90));
        assert!(config.fuzzy_attorney_matching);
        assert!(config.fuzzy_firm_matching);
    }

    #[test]
    fn test_builder_methods() {
        let config = DeduplicationConfig::default()
            .with_similarity_threshold(0.85)
            .with_fuzzy_attorney_matching(false)
            .with_fuzzy_firm_matching(false);

        assert!(approx_eq(config.similarity_threshold, 0.85));
        assert!(!config.fuzzy_attorney_matching);
        assert!(!config.fuzzy_firm_matching);
    }

    #[test]
    fn test_threshold_is_clamped() {
        let config = DeduplicationConfig::default().with_similarity_threshold(3.0);
        assert!(approx_eq(config.similarity_threshold, 1.0));

        let config = DeduplicationConfig::default().with_similarity_threshold(f64::NAN);
        assert!(approx_eq(config.similarity_threshold, 0.90));
    }

    #[test]
    fn test_exact_only() {
        let config = DeduplicationConfig::exact_only();
        assert!(approx_eq(config.similarity_threshold, 1.0));
        assert!(!config.fuzzy_attorney_matching);
        assert!(!config.fuzzy_firm_matching);
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold(" 0.8 "), Some(0.8));
        assert_eq!(parse_threshold("1"), Some(1.0));
        assert_eq!(parse_threshold("1.5"), None);
        assert_eq!(parse_threshold("-0.1"), None);
        assert_eq!(parse_threshold("high"), None);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" off "));
    }
}
