//! Check CLI command.
//!
//! Builds an engine over an existing lead file and reports whether a single
//! candidate lead is already known.

use crate::io::read_leads;
use crate::models::Lead;
use crate::services::deduplication::{DeduplicationConfig, DeduplicationEngine, MatchResult};
use crate::Result;
use std::path::PathBuf;

/// Check command handler.
#[derive(Debug, Clone)]
pub struct CheckCommand {
    /// File holding the known leads.
    pub existing: PathBuf,
    /// Deduplication policy.
    pub config: DeduplicationConfig,
}

impl CheckCommand {
    /// Creates a new check command.
    #[must_use]
    pub fn new(existing: impl Into<PathBuf>, config: DeduplicationConfig) -> Self {
        Self {
            existing: existing.into(),
            config,
        }
    }

    /// Checks the candidate against the existing population.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing lead file cannot be read.
    pub fn run(&self, candidate: &Lead) -> Result<MatchResult> {
        let existing = read_leads(&self.existing)?;
        let engine = DeduplicationEngine::with_config(existing, self.config.clone());
        Ok(engine.is_duplicate(candidate))
    }
}

/// Renders a verdict for the terminal.
#[must_use]
pub fn format_verdict(candidate: &Lead, result: &MatchResult) -> String {
    match (&result.matched_lead, result.reason) {
        (Some(matched), Some(reason)) => {
            let score = result
                .similarity_score
                .map(|score| format!(", similarity {score:.3}"))
                .unwrap_or_default();
            format!("DUPLICATE: {candidate} matches {matched} ({reason}{score})")
        },
        _ => format!("UNIQUE: {candidate}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::deduplication::MatchReason;
    use std::sync::Arc;

    #[test]
    fn test_format_unique() {
        let lead = Lead::new().with_firm_name("Alpha Legal");
        assert_eq!(format_verdict(&lead, &MatchResult::unique()), "UNIQUE: Alpha Legal");
    }

    #[test]
    fn test_format_duplicate() {
        let matched = Arc::new(
            Lead::new()
                .with_firm_name("Smith Law Firm LLC")
                .with_attorney_name("John Smith, Esq."),
        );
        let candidate = Lead::new()
            .with_firm_name("Smith Law Firm")
            .with_attorney_name("John Smithe");
        let result = MatchResult::duplicate(matched, MatchReason::FirmAndAttorneyMatch, Some(0.909_09));

        assert_eq!(
            format_verdict(&candidate, &result),
            "DUPLICATE: John Smithe at Smith Law Firm matches John Smith, Esq. at Smith Law Firm LLC \
             (firm_and_attorney_match, similarity 0.909)"
        );
    }

    #[test]
    fn test_run_against_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.json");
        std::fs::write(&path, r#"[{"email": "john@testfirm.com"}]"#).unwrap();

        let command = CheckCommand::new(&path, DeduplicationConfig::default());
        let result = command
            .run(&Lead::new().with_email("John@TestFirm.com"))
            .unwrap();
        assert_eq!(result.reason_str(), "email_match");

        let missing = CheckCommand::new(dir.path().join("missing.json"), DeduplicationConfig::default());
        assert!(missing.run(&Lead::new()).is_err());
    }
}
