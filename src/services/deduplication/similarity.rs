//! Fuzzy string similarity.
//!
//! Used only as a secondary confirmation signal when canonical keys differ
//! slightly (an added character, a suffix variant the normalizer does not
//! know about). Exact key equality always wins first.

/// Default similarity threshold for a fuzzy match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.90;

/// Returns the normalized edit-distance similarity of two strings.
///
/// The score is `1 - levenshtein(a, b) / max(len(a), len(b))` over Unicode
/// scalar values: symmetric, in `[0, 1]`, `1.0` for identical strings
/// (including two empty strings) and `0.0` when exactly one side is empty.
///
/// # Example
///
/// ```rust
/// use leadmatch::services::deduplication::similarity;
///
/// assert!((similarity("john smith", "john smith") - 1.0).abs() < f64::EPSILON);
/// assert!(similarity("john smith", "john smithe") > 0.9);
/// assert!(similarity("john smith", "jane doe") < 0.5);
/// ```
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Threshold-gated similarity scorer.
///
/// A pair matches when its score is greater than or equal to the threshold,
/// so the default `0.90` accepts a score of exactly `0.90`.
///
/// # Example
///
/// ```rust
/// use leadmatch::SimilarityScorer;
///
/// let scorer = SimilarityScorer::default();
/// assert_eq!(scorer.matches("john smith", "john smith"), Some(1.0));
/// assert!(scorer.matches("john smith", "john smithe").is_some());
/// assert!(scorer.matches("john smith", "jane doe").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScorer {
    threshold: f64,
}

impl SimilarityScorer {
    /// Creates a scorer with the given threshold.
    ///
    /// Out-of-range thresholds are clamped into `[0, 1]`; a NaN threshold
    /// falls back to the default.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            DEFAULT_SIMILARITY_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self { threshold }
    }

    /// Returns the configured threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the similarity score of two strings.
    #[must_use]
    pub fn score(&self, a: &str, b: &str) -> f64 {
        similarity(a, b)
    }

    /// Returns true if the score reaches the threshold.
    #[must_use]
    pub fn is_match(&self, a: &str, b: &str) -> bool {
        self.matches(a, b).is_some()
    }

    /// Returns the score when the strings are equal or similar enough.
    ///
    /// Equal strings short-circuit to `1.0` without computing the distance.
    #[must_use]
    pub fn matches(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(1.0);
        }
        let score = similarity(a, b);
        (score >= self.threshold).then_some(score)
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_strings() {
        assert!(approx_eq(similarity("john smith", "john smith"), 1.0));
        assert!(approx_eq(similarity("", ""), 1.0));
    }

    #[test]
    fn test_one_empty_side() {
        assert!(approx_eq(similarity("", "john"), 0.0));
        assert!(approx_eq(similarity("john", ""), 0.0));
    }

    #[test]
    fn test_near_and_far() {
        // One inserted character out of eleven.
        assert!(approx_eq(similarity("john smith", "john smithe"), 1.0 - 1.0 / 11.0));
        assert!(similarity("john smith", "jane doe") < 0.5);
    }

    #[test]
    fn test_symmetric() {
        assert!(approx_eq(
            similarity("potomac estate", "potomac estates"),
            similarity("potomac estates", "potomac estate")
        ));
    }

    #[test]
    fn test_scorer_threshold() {
        let strict = SimilarityScorer::new(0.95);
        assert!(!strict.is_match("john smith", "john smithe"));

        let default = SimilarityScorer::default();
        assert!(approx_eq(default.threshold(), DEFAULT_SIMILARITY_THRESHOLD));
        assert!(default.is_match("john smith", "john smithe"));
    }

    #[test]
    fn test_score_equal_to_threshold_matches() {
        // One edit over two characters scores exactly 0.5.
        let half = SimilarityScorer::new(0.5);
        assert_eq!(half.matches("ab", "ac"), Some(0.5));
        assert!(SimilarityScorer::new(0.51).matches("ab", "ac").is_none());
    }

    #[test]
    fn test_scorer_clamps_threshold() {
        assert!(approx_eq(SimilarityScorer::new(1.7).threshold(), 1.0));
        assert!(approx_eq(SimilarityScorer::new(-0.2).threshold(), 0.0));
        assert!(approx_eq(
            SimilarityScorer::new(f64::NAN).threshold(),
            DEFAULT_SIMILARITY_THRESHOLD
        ));
    }

    #[test]
    fn test_exact_threshold_only_matches_equal() {
        let exact = SimilarityScorer::new(1.0);
        assert_eq!(exact.matches("ann", "ann"), Some(1.0));
        assert!(exact.matches("ann", "anne").is_none());
    }
}
