//! Deduplication result types.
//!
//! This module defines the verdicts returned by duplicate checks and the
//! partition produced by batch deduplication.

use crate::models::Lead;
use serde::Serialize;
use std::sync::Arc;

/// Result of a duplicate check.
///
/// A unique result carries no matched lead and no reason. A duplicate result
/// always carries both; `similarity_score` is set only when a fuzzy
/// comparison decided the match.
///
/// # Example
///
/// ```rust
/// use leadmatch::{Lead, MatchReason, MatchResult};
/// use std::sync::Arc;
///
/// let existing = Arc::new(Lead::new().with_email("john@testfirm.com"));
/// let result = MatchResult::duplicate(Arc::clone(&existing), MatchReason::EmailMatch, None);
///
/// assert!(result.is_duplicate);
/// assert_eq!(result.reason_str(), "email_match");
/// assert_eq!(MatchResult::unique().reason_str(), "");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// Whether the lead is the same entity as a known lead.
    pub is_duplicate: bool,

    /// The known lead it matched.
    pub matched_lead: Option<Arc<Lead>>,

    /// Which signal decided the match.
    pub reason: Option<MatchReason>,

    /// Similarity score for fuzzy matches (0.0 to 1.0).
    pub similarity_score: Option<f64>,
}

impl MatchResult {
    /// Creates a result indicating no duplicate was found.
    #[must_use]
    pub const fn unique() -> Self {
        Self {
            is_duplicate: false,
            matched_lead: None,
            reason: None,
            similarity_score: None,
        }
    }

    /// Creates a result indicating a duplicate of `matched_lead`.
    #[must_use]
    pub const fn duplicate(
        matched_lead: Arc<Lead>,
        reason: MatchReason,
        similarity_score: Option<f64>,
    ) -> Self {
        Self {
            is_duplicate: true,
            matched_lead: Some(matched_lead),
            reason: Some(reason),
            similarity_score,
        }
    }

    /// Returns the reason label, or `""` for a unique result.
    #[must_use]
    pub fn reason_str(&self) -> &'static str {
        self.reason.map_or("", MatchReason::as_str)
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::unique()
    }
}

/// The signal that identified a lead as a duplicate.
///
/// # Variants
///
/// - `EmailMatch`: normalized attorney emails are equal
/// - `PhoneMatch`: normalized phone numbers are equal
/// - `WebsiteMatch`: same website, and the new lead names no attorney
/// - `WebsiteAndAttorneyMatch`: same website and the same (or similar) attorney
/// - `FirmAndAttorneyMatch`: same normalized firm and the same (or similar) attorney
/// - `FuzzyFirmAndAttorneyMatch`: a similar firm name and the same (or similar) attorney
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// Normalized attorney emails are equal.
    EmailMatch,

    /// Normalized phone numbers are equal.
    PhoneMatch,

    /// Same website; the new lead is a firm-level listing.
    WebsiteMatch,

    /// Same website and attorney.
    WebsiteAndAttorneyMatch,

    /// Same firm and attorney.
    FirmAndAttorneyMatch,

    /// Similar firm name and same attorney.
    FuzzyFirmAndAttorneyMatch,
}

impl MatchReason {
    /// Returns the reason as a stable `snake_case` label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmailMatch => "email_match",
            Self::PhoneMatch => "phone_match",
            Self::WebsiteMatch => "website_match",
            Self::WebsiteAndAttorneyMatch => "website_and_attorney_match",
            Self::FirmAndAttorneyMatch => "firm_and_attorney_match",
            Self::FuzzyFirmAndAttorneyMatch => "fuzzy_firm_and_attorney_match",
        }
    }
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lead rejected by batch deduplication, with what it matched.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateMatch {
    /// The rejected lead.
    pub lead: Arc<Lead>,
    /// The known lead it duplicates.
    pub matched_lead: Arc<Lead>,
    /// Which signal decided the match.
    pub reason: MatchReason,
    /// Similarity score for fuzzy matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

/// Partition of a batch into accepted and rejected leads, both in input order.
#[derive(Debug, Clone, Default)]
pub struct DeduplicationOutcome {
    /// Leads certified unique and added to the engine.
    pub unique: Vec<Arc<Lead>>,
    /// Leads rejected as duplicates.
    pub duplicates: Vec<DuplicateMatch>,
}

impl DeduplicationOutcome {
    /// Returns the number of leads processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.unique.len() + self.duplicates.len()
    }
}

impl From<DeduplicationOutcome> for (Vec<Arc<Lead>>, Vec<DuplicateMatch>) {
    fn from(outcome: DeduplicationOutcome) -> Self {
        (outcome.unique, outcome.duplicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_result() {
        let result = MatchResult::unique();
        assert!(!result.is_duplicate);
        assert!(result.matched_lead.is_none());
        assert!(result.reason.is_none());
        assert!(result.similarity_score.is_none());
        assert_eq!(result.reason_str(), "");
    }

    #[test]
    fn test_duplicate_result() {
        let lead = Arc::new(Lead::new().with_phone("(202) 555-0100"));
        let result = MatchResult::duplicate(Arc::clone(&lead), MatchReason::PhoneMatch, None);

        assert!(result.is_duplicate);
        assert_eq!(result.reason, Some(MatchReason::PhoneMatch));
        assert!(result
            .matched_lead
            .as_ref()
            .is_some_and(|m| Arc::ptr_eq(m, &lead)));
    }

    #[test]
    fn test_match_reason_display() {
        assert_eq!(MatchReason::EmailMatch.to_string(), "email_match");
        assert_eq!(MatchReason::PhoneMatch.to_string(), "phone_match");
        assert_eq!(MatchReason::WebsiteMatch.to_string(), "website_match");
        assert_eq!(
            MatchReason::WebsiteAndAttorneyMatch.to_string(),
            "website_and_attorney_match"
        );
        assert_eq!(
            MatchReason::FirmAndAttorneyMatch.to_string(),
            "firm_and_attorney_match"
        );
        assert_eq!(
            MatchReason::FuzzyFirmAndAttorneyMatch.to_string(),
            "fuzzy_firm_and_attorney_match"
        );
    }

    #[test]
    fn test_match_reason_serializes_snake_case() {
        let json = serde_json::to_string(&MatchReason::FirmAndAttorneyMatch).unwrap();
        assert_eq!(json, "\"firm_and_attorney_match\"");
    }

    #[test]
    fn test_outcome_into_tuple() {
        let a = Arc::new(Lead::new().with_email("a@example.com"));
        let b = Arc::new(Lead::new().with_email("a@example.com"));
        let outcome = DeduplicationOutcome {
            unique: vec![Arc::clone(&a)],
            duplicates: vec![DuplicateMatch {
                lead: b,
                matched_lead: Arc::clone(&a),
                reason: MatchReason::EmailMatch,
                similarity_score: None,
            }],
        };
        assert_eq!(outcome.total(), 2);

        let (unique, duplicates): (Vec<Arc<Lead>>, Vec<DuplicateMatch>) = outcome.into();
        assert_eq!(unique.len(), 1);
        assert_eq!(duplicates[0].reason, MatchReason::EmailMatch);
    }
}
