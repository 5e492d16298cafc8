//! Lead deduplication.
//!
//! This module decides whether a newly observed lead is the same real-world
//! entity as one already known, and why. Four signals are checked in a fixed
//! priority order, exiting early on the first match:
//! 1. **Email**: normalized attorney email
//! 2. **Phone**: ten-digit North-American phone
//! 3. **Website**: normalized website, confirmed by attorney name
//! 4. **Firm + attorney**: normalized pair, optionally confirmed by similarity
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    DeduplicationEngine                          │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────────────┐ │
//! │  │ Normalizer   │  │ Similarity   │  │ MatchIndex             │ │
//! │  │              │  │ Scorer       │  │                        │ │
//! │  │ canonical    │  │ normalized   │  │ email / phone / pair   │ │
//! │  │ keys         │  │ Levenshtein  │  │ website → [leads]      │ │
//! │  └──────────────┘  └──────────────┘  └────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use leadmatch::services::deduplication::DeduplicationEngine;
//! use leadmatch::Lead;
//!
//! let mut engine = DeduplicationEngine::new(vec![
//!     Lead::new().with_phone("(202) 555-0100"),
//! ]);
//!
//! let outcome = engine.deduplicate_list(vec![
//!     Lead::new().with_phone("202-555-0100"),
//!     Lead::new().with_email("new@example.com"),
//! ]);
//!
//! assert_eq!(outcome.unique.len(), 1);
//! assert_eq!(outcome.duplicates[0].reason.as_str(), "phone_match");
//! ```

mod config;
mod index;
mod normalizer;
mod service;
mod similarity;
mod types;

pub(crate) use config::parse_threshold;
pub use config::DeduplicationConfig;
pub use index::MatchIndex;
pub use normalizer::{
    FirmAttorneyKey, NormalizedKeySet, normalize_email, normalize_firm_name,
    normalize_person_name, normalize_phone, normalize_website,
};
pub use service::DeduplicationEngine;
pub use similarity::{DEFAULT_SIMILARITY_THRESHOLD, SimilarityScorer, similarity};
pub use types::{DeduplicationOutcome, DuplicateMatch, MatchReason, MatchResult};
