//! Integration tests for leadmatch.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::too_many_lines,
    clippy::doc_markdown
)]

use std::sync::Arc;

use leadmatch::io::{read_leads, write_leads};
use leadmatch::services::deduplication::{
    normalize_email, normalize_firm_name, normalize_person_name, normalize_phone, similarity,
};
use leadmatch::{DeduplicationConfig, DeduplicationEngine, Error, Lead, MatchReason};

fn lead(firm: &str, attorney: &str) -> Lead {
    Lead::new().with_firm_name(firm).with_attorney_name(attorney)
}

#[test]
fn test_error_types() {
    let err = Error::InvalidInput("test message".to_string());
    let display = format!("{err}");
    assert!(display.contains("invalid input"));
    assert!(display.contains("test message"));

    let err = Error::OperationFailed {
        operation: "read_leads".to_string(),
        cause: "file not found".to_string(),
    };
    let display = format!("{err}");
    assert!(display.contains("read_leads"));
    assert!(display.contains("file not found"));
}

#[test]
fn test_normalization_examples() {
    assert_eq!(normalize_email("Test@Example.COM").as_deref(), Some("test@example.com"));
    assert_eq!(normalize_email("  test@example.com  ").as_deref(), Some("test@example.com"));

    for rendering in [
        "(202) 555-0100",
        "202-555-0100",
        "202.555.0100",
        "1-202-555-0100",
        "+1 202 555 0100",
    ] {
        assert_eq!(normalize_phone(rendering).as_deref(), Some("2025550100"), "{rendering}");
    }

    assert_eq!(normalize_firm_name("Smith Law Firm LLC").as_deref(), Some("smith"));
    assert_eq!(
        normalize_firm_name("Williams Elder Law PLLC").as_deref(),
        Some("williams elder law")
    );
    assert_eq!(
        normalize_person_name("Mr. James Wilson III").as_deref(),
        Some("james wilson")
    );
}

#[test]
fn test_similarity_examples() {
    assert!((similarity("john smith", "john smith") - 1.0).abs() < f64::EPSILON);
    assert!(similarity("john smith", "john smithe") > 0.9);
    assert!(similarity("john smith", "jane doe") < 0.5);
}

#[test]
fn test_email_match_ignores_names() {
    let existing = lead("Test Firm", "John Test").with_email("john@testfirm.com");
    let engine = DeduplicationEngine::new(vec![existing]);

    let candidate = lead("Completely Different LLP", "Someone Else").with_email("john@testfirm.com");
    let result = engine.is_duplicate(&candidate);

    assert!(result.is_duplicate);
    assert_eq!(result.reason, Some(MatchReason::EmailMatch));
    assert_eq!(result.reason_str(), "email_match");
    assert_eq!(
        result.matched_lead.unwrap().attorney_email.as_deref(),
        Some("john@testfirm.com")
    );
}

#[test]
fn test_phone_match_across_renderings() {
    let existing = Lead::new().with_phone("(202) 555-0100");
    let engine = DeduplicationEngine::new(vec![existing]);

    let result = engine.is_duplicate(&Lead::new().with_phone("202-555-0100"));
    assert!(result.is_duplicate);
    assert_eq!(result.reason_str(), "phone_match");
}

#[test]
fn test_firm_and_attorney_match() {
    let engine = DeduplicationEngine::new(vec![lead("Smith Law Firm LLC", "John Smith, Esq.")]);

    let result = engine.is_duplicate(&lead("Smith Law Firm", "John Smith"));
    assert!(result.is_duplicate);
    assert!(result.reason_str().contains("firm"));
    assert!(result.reason_str().contains("attorney"));
    assert_eq!(result.similarity_score, None);
}

#[test]
fn test_website_match_without_attorney() {
    let existing = Lead::new()
        .with_firm_name("Alpha Legal")
        .with_website("https://alphalegal.com");
    let engine = DeduplicationEngine::new(vec![existing]);

    let result = engine.is_duplicate(&Lead::new().with_website("https://alphalegal.com/"));
    assert!(result.is_duplicate);
    assert!(result.reason_str().contains("website"));
}

#[test]
fn test_website_with_suffix_only_attorney_is_unique() {
    let existing = Lead::new()
        .with_website("https://alphalegal.com")
        .with_attorney_name("Ann Alpha");
    let engine = DeduplicationEngine::new(vec![existing]);

    let candidate = Lead::new()
        .with_website("alphalegal.com")
        .with_attorney_name("Esq.");
    let result = engine.is_duplicate(&candidate);
    assert!(!result.is_duplicate);
    assert_eq!(result.reason_str(), "");
}

#[test]
fn test_website_with_similar_attorney() {
    let existing = vec![
        Lead::new()
            .with_website("https://alphalegal.com")
            .with_attorney_name("John Smith"),
    ];
    let candidate = Lead::new()
        .with_website("alphalegal.com")
        .with_attorney_name("John Smithe");

    let result = DeduplicationEngine::new(existing.clone()).is_duplicate(&candidate);
    assert_eq!(result.reason, Some(MatchReason::WebsiteAndAttorneyMatch));
    let score = result.similarity_score.unwrap();
    assert!((score - 0.909).abs() < 1e-3);

    let exact = DeduplicationEngine::with_config(existing, DeduplicationConfig::exact_only());
    assert!(!exact.is_duplicate(&candidate).is_duplicate);
}

#[test]
fn test_distinct_leads_are_unique() {
    let existing = lead("Alpha Legal", "Ann Alpha").with_email("ann@alphalegal.com");
    let engine = DeduplicationEngine::new(vec![existing]);

    let result = engine.is_duplicate(&lead("Beta Law Group", "Bob Beta").with_email("bob@betalaw.com"));
    assert!(!result.is_duplicate);
    assert!(result.matched_lead.is_none());
    assert_eq!(result.reason_str(), "");
    assert_eq!(result.similarity_score, None);
}

#[test]
fn test_deduplicate_list_first_seen_wins() {
    let existing = lead("Alpha Legal", "Ann Alpha").with_email("ann@alphalegal.com");
    let mut engine = DeduplicationEngine::new(vec![existing]);

    let c = Arc::new(lead("Gamma Legal", "Carl Gamma").with_email("x@gamma.com"));
    let a_copy = Arc::new(lead("Alpha Legal Group", "Ann A.").with_email("ann@alphalegal.com"));
    let d = Arc::new(lead("Delta Law", "Dora Delta").with_email("z@delta.com"));
    let e = Arc::new(lead("Epsilon Partners", "Eve Epsilon").with_email("x@gamma.com"));

    let outcome = engine.deduplicate_list(vec![c.clone(), a_copy.clone(), d.clone(), e.clone()]);

    assert_eq!(outcome.unique.len(), 2);
    assert!(Arc::ptr_eq(&outcome.unique[0], &c));
    assert!(Arc::ptr_eq(&outcome.unique[1], &d));

    assert_eq!(outcome.duplicates.len(), 2);
    assert!(Arc::ptr_eq(&outcome.duplicates[0].lead, &a_copy));
    assert_eq!(outcome.duplicates[0].reason, MatchReason::EmailMatch);
    assert!(Arc::ptr_eq(&outcome.duplicates[1].lead, &e));
    assert!(Arc::ptr_eq(&outcome.duplicates[1].matched_lead, &c));

    // Accepted leads stay indexed for later checks.
    assert_eq!(engine.len(), 3);
    assert!(engine.is_duplicate(&Lead::new().with_email("Z@Delta.com")).is_duplicate);
}

#[test]
fn test_add_lead_extends_population() {
    let mut engine = DeduplicationEngine::new(Vec::<Lead>::new());
    assert!(engine.is_empty());

    let candidate = Lead::new().with_phone("+1 (415) 555-0199");
    assert!(!engine.is_duplicate(&candidate).is_duplicate);

    engine.add_lead(candidate.clone());
    let result = engine.is_duplicate(&Lead::new().with_phone("415.555.0199"));
    assert_eq!(result.reason_str(), "phone_match");
    assert_eq!(engine.len(), 1);
}

#[test]
fn test_lead_without_signal_is_unique() {
    let engine = DeduplicationEngine::new(vec![Lead::new(), lead("Alpha Legal", "")]);

    assert!(!engine.is_duplicate(&Lead::new()).is_duplicate);
    assert!(!engine.is_duplicate(&Lead::new().with_firm_name("Alpha Legal")).is_duplicate);
    assert!(!engine.is_duplicate(&Lead::new().with_phone("555-0100")).is_duplicate);
}

#[test]
fn test_exact_only_config_disables_fuzzy() {
    let existing = vec![lead("Smith Law Firm LLC", "John Smith")];
    let candidate = lead("Smith Law Firm", "John Smithe");

    let fuzzy = DeduplicationEngine::new(existing.clone());
    let result = fuzzy.is_duplicate(&candidate);
    assert_eq!(result.reason, Some(MatchReason::FirmAndAttorneyMatch));
    assert!(result.similarity_score.unwrap() > 0.9);

    let exact = DeduplicationEngine::with_config(existing, DeduplicationConfig::exact_only());
    assert!(!exact.is_duplicate(&candidate).is_duplicate);
}

#[test]
fn test_file_round_trip_feeds_engine() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("leads.json");
    let csv_path = dir.path().join("leads.csv");

    let leads = vec![
        lead("Smith Law Firm LLC", "John Smith, Esq.").with_phone("(202) 555-0100"),
        lead("Williams Elder Law PLLC", "Mary Williams").with_website("https://williamselderlaw.com"),
    ];

    write_leads(&json_path, &leads).unwrap();
    write_leads(&csv_path, &leads).unwrap();

    for path in [&json_path, &csv_path] {
        let loaded = read_leads(path).unwrap();
        assert_eq!(loaded.len(), 2, "{}", path.display());
        assert_eq!(loaded[1].firm_name.as_deref(), Some("Williams Elder Law PLLC"));

        let engine = DeduplicationEngine::new(loaded);
        let result = engine.is_duplicate(&Lead::new().with_website("williamselderlaw.com/"));
        assert_eq!(result.reason_str(), "website_match", "{}", path.display());
    }
}
