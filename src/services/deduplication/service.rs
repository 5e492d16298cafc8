//! Deduplication engine.
//!
//! Evaluates the match signals in a fixed priority order and returns on the
//! first hit:
//! 1. **Email**: normalized attorney email
//! 2. **Phone**: normalized ten-digit phone
//! 3. **Website**: normalized website, confirmed by the attorney name
//! 4. **Firm + attorney**: normalized pair, with optional fuzzy confirmation
//!
//! Every step is a hash lookup except the fuzzy firm check, which scores the
//! candidate firm against each distinct known firm (O(firms) per check). It
//! runs only after every cheaper step has missed.
//!
//! The engine is a single-writer, synchronous structure. Callers that share
//! it across threads must serialize access themselves.

use crate::models::Lead;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

use super::config::DeduplicationConfig;
use super::index::MatchIndex;
use super::normalizer::{NormalizedKeySet, normalize_person_name};
use super::similarity::SimilarityScorer;
use super::types::{DeduplicationOutcome, DuplicateMatch, MatchReason, MatchResult};

/// Entity-resolution engine over a population of known leads.
///
/// Owns the [`MatchIndex`] and the canonical list of known leads. The index
/// is built from the initial population at construction and extended only
/// through [`DeduplicationEngine::add_lead`].
///
/// # Example
///
/// ```rust
/// use leadmatch::{DeduplicationEngine, Lead};
///
/// let existing = vec![Lead::new().with_email("john@testfirm.com")];
/// let engine = DeduplicationEngine::new(existing);
///
/// let candidate = Lead::new()
///     .with_firm_name("Different Firm")
///     .with_email("JOHN@testfirm.com");
/// let result = engine.is_duplicate(&candidate);
///
/// assert!(result.is_duplicate);
/// assert_eq!(result.reason_str(), "email_match");
/// ```
#[derive(Debug)]
pub struct DeduplicationEngine {
    /// Configuration.
    config: DeduplicationConfig,
    /// Threshold-gated scorer derived from the configuration.
    scorer: SimilarityScorer,
    /// Lookup tables over `known`.
    index: MatchIndex,
    /// Every known lead, in insertion order.
    known: Vec<Arc<Lead>>,
}

impl DeduplicationEngine {
    /// Creates an engine over the existing leads with the default configuration.
    #[must_use]
    pub fn new<I>(existing: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arc<Lead>>,
    {
        Self::with_config(existing, DeduplicationConfig::default())
    }

    /// Creates an engine over the existing leads with the given configuration.
    #[must_use]
    pub fn with_config<I>(existing: I, config: DeduplicationConfig) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arc<Lead>>,
    {
        let scorer = SimilarityScorer::new(config.similarity_threshold);
        let mut engine = Self {
            config,
            scorer,
            index: MatchIndex::new(),
            known: Vec::new(),
        };

        for lead in existing {
            engine.add_lead(lead);
        }

        tracing::info!(
            known_leads = engine.known.len(),
            emails = engine.index.email_count(),
            phones = engine.index.phone_count(),
            websites = engine.index.website_count(),
            firm_attorney_pairs = engine.index.firm_attorney_count(),
            "Built deduplication index"
        );

        engine
    }

    /// Checks whether a lead is the same entity as a known lead.
    ///
    /// Signals are tried in the order email, phone, website, firm + attorney;
    /// the first hit wins. A lead with no usable signal is always unique.
    #[instrument(
        skip(self, lead),
        fields(operation = "dedup_check", known_leads = self.known.len())
    )]
    pub fn is_duplicate(&self, lead: &Lead) -> MatchResult {
        let start = Instant::now();
        let keys = NormalizedKeySet::from_lead(lead);

        let result = if keys.has_signal() {
            self.check_email(&keys)
                .or_else(|| self.check_phone(&keys))
                .or_else(|| self.check_website(lead, &keys))
                .or_else(|| self.check_firm_attorney(&keys))
                .unwrap_or_default()
        } else {
            tracing::debug!(lead = %lead, "Lead carries no identifying signal");
            MatchResult::unique()
        };

        record_check_metrics(&result, start);
        if let (Some(reason), Some(matched)) = (result.reason, &result.matched_lead) {
            tracing::debug!(
                lead = %lead,
                matched = %matched,
                reason = %reason,
                similarity_score = ?result.similarity_score,
                "Duplicate found"
            );
        }

        result
    }

    /// Adds a lead to the known population and indexes its signals.
    ///
    /// Callers add each lead once, after a unique verdict. Adding the same
    /// lead twice duplicates its index entries.
    pub fn add_lead(&mut self, lead: impl Into<Arc<Lead>>) {
        let lead = lead.into();
        self.index.insert(Arc::clone(&lead));
        self.known.push(lead);
        metrics::counter!("lead_dedup_leads_indexed_total").increment(1);
    }

    /// Partitions new leads into unique and duplicate, in input order.
    ///
    /// Each unique lead is added to the engine before the next one is
    /// checked, so a later lead that repeats an earlier one in the same batch
    /// is reported as a duplicate of it (first seen wins).
    #[instrument(skip(self, new_leads), fields(operation = "dedup_batch"))]
    pub fn deduplicate_list<I>(&mut self, new_leads: I) -> DeduplicationOutcome
    where
        I: IntoIterator,
        I::Item: Into<Arc<Lead>>,
    {
        let mut outcome = DeduplicationOutcome::default();

        for lead in new_leads {
            let lead = lead.into();
            let result = self.is_duplicate(&lead);
            match (result.matched_lead, result.reason) {
                (Some(matched_lead), Some(reason)) => outcome.duplicates.push(DuplicateMatch {
                    lead,
                    matched_lead,
                    reason,
                    similarity_score: result.similarity_score,
                }),
                _ => {
                    outcome.unique.push(Arc::clone(&lead));
                    self.add_lead(lead);
                },
            }
        }

        tracing::info!(
            unique = outcome.unique.len(),
            duplicates = outcome.duplicates.len(),
            total = outcome.total(),
            "Deduplicated batch"
        );

        outcome
    }

    /// Returns every known lead in insertion order.
    #[must_use]
    pub fn known_leads(&self) -> &[Arc<Lead>] {
        &self.known
    }

    /// Returns the number of known leads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Returns true if no lead is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Returns the match index.
    #[must_use]
    pub const fn index(&self) -> &MatchIndex {
        &self.index
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &DeduplicationConfig {
        &self.config
    }

    fn check_email(&self, keys: &NormalizedKeySet) -> Option<MatchResult> {
        let existing = self.index.lookup_email(keys.email.as_deref()?)?;
        Some(MatchResult::duplicate(
            Arc::clone(existing),
            MatchReason::EmailMatch,
            None,
        ))
    }

    fn check_phone(&self, keys: &NormalizedKeySet) -> Option<MatchResult> {
        let existing = self.index.lookup_phone(keys.phone.as_deref()?)?;
        Some(MatchResult::duplicate(
            Arc::clone(existing),
            MatchReason::PhoneMatch,
            None,
        ))
    }

    /// A firm-level listing (no attorney) matches any lead on the same
    /// website; otherwise the attorney must match too. An attorney name that
    /// normalizes to nothing (e.g. `"Esq."`) is neither, and never matches.
    fn check_website(&self, lead: &Lead, keys: &NormalizedKeySet) -> Option<MatchResult> {
        let website = keys.website.as_deref()?;
        let firm_level = lead
            .attorney_name
            .as_deref()
            .is_none_or(|name| name.trim().is_empty());
        if !firm_level && keys.attorney.is_none() {
            return None;
        }

        self.index
            .lookup_website(website)
            .iter()
            .find_map(|existing| match keys.attorney.as_deref() {
                None => Some(MatchResult::duplicate(
                    Arc::clone(existing),
                    MatchReason::WebsiteMatch,
                    None,
                )),
                Some(attorney) => self.attorney_score(attorney, existing).map(|score| {
                    MatchResult::duplicate(
                        Arc::clone(existing),
                        MatchReason::WebsiteAndAttorneyMatch,
                        fuzzy_score(score),
                    )
                }),
            })
    }

    fn check_firm_attorney(&self, keys: &NormalizedKeySet) -> Option<MatchResult> {
        let pair = keys.firm_attorney()?;

        if let Some(existing) = self.index.lookup_firm_attorney(&pair) {
            return Some(MatchResult::duplicate(
                Arc::clone(existing),
                MatchReason::FirmAndAttorneyMatch,
                None,
            ));
        }

        if self.config.fuzzy_attorney_matching {
            let same_firm = self.index.firm_members(&pair.firm).iter().find_map(|existing| {
                self.attorney_score(&pair.attorney, existing)
                    .map(|score| (existing, score))
            });
            if let Some((existing, score)) = same_firm {
                return Some(MatchResult::duplicate(
                    Arc::clone(existing),
                    MatchReason::FirmAndAttorneyMatch,
                    fuzzy_score(score),
                ));
            }
        }

        if !self.config.fuzzy_firm_matching {
            return None;
        }

        self.index
            .firms()
            .filter(|firm| *firm != pair.firm)
            .filter_map(|firm| {
                self.scorer
                    .matches(&pair.firm, firm)
                    .map(|firm_score| (firm, firm_score))
            })
            .find_map(|(firm, firm_score)| {
                self.index.firm_members(firm).iter().find_map(|existing| {
                    self.attorney_score(&pair.attorney, existing).map(|score| {
                        MatchResult::duplicate(
                            Arc::clone(existing),
                            MatchReason::FuzzyFirmAndAttorneyMatch,
                            Some(firm_score.min(score)),
                        )
                    })
                })
            })
    }

    /// Scores a normalized attorney name against a known lead's attorney.
    ///
    /// Exact equality scores `1.0`. Below that, a score is returned only when
    /// fuzzy attorney matching is enabled and the threshold is reached.
    fn attorney_score(&self, attorney: &str, existing: &Lead) -> Option<f64> {
        let known = existing
            .attorney_name
            .as_deref()
            .and_then(normalize_person_name)?;

        if known == attorney {
            Some(1.0)
        } else if self.config.fuzzy_attorney_matching {
            self.scorer.matches(attorney, &known)
        } else {
            None
        }
    }
}

/// Keeps a score only when it records a fuzzy decision.
fn fuzzy_score(score: f64) -> Option<f64> {
    (score < 1.0).then_some(score)
}

/// Records check counters and the check duration.
#[allow(clippy::cast_precision_loss)] // Durations in microseconds fit an f64 mantissa.
fn record_check_metrics(result: &MatchResult, start: Instant) {
    let outcome = if result.is_duplicate { "duplicate" } else { "unique" };
    metrics::counter!("lead_dedup_checks_total", "result" => outcome).increment(1);

    if let Some(reason) = result.reason {
        metrics::counter!("lead_dedup_duplicates_total", "reason" => reason.as_str())
            .increment(1);
    }

    metrics::histogram!("lead_dedup_check_duration_us")
        .record(start.elapsed().as_micros() as f64);
}
