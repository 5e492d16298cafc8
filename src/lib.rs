//! # Leadmatch
//!
//! Entity resolution for law-firm outreach leads.
//!
//! Leads arrive from several directories and scrapers, and the same firm or
//! attorney routinely shows up under different spellings ("Smith Law Firm LLC"
//! vs. "Smith Law Firm", "(202) 555-0100" vs. "202-555-0100"). Leadmatch decides,
//! for every newly observed lead, whether it is the same real-world entity as a
//! lead that is already known, and reports which signal matched.
//!
//! ## Features
//!
//! - Canonical comparison keys for emails, phones, firm names, person names and websites
//! - Priority-ordered match signals (email → phone → website → firm + attorney)
//! - Fuzzy confirmation via normalized edit-distance similarity
//! - Order-dependent batch deduplication (first seen wins)
//! - JSON / CSV lead import and export for the persistence hand-off
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use leadmatch::{DeduplicationEngine, Lead};
//!
//! let existing = Arc::new(
//!     Lead::new()
//!         .with_firm_name("Smith Law Firm LLC")
//!         .with_attorney_name("John Smith, Esq."),
//! );
//! let engine = DeduplicationEngine::new(vec![existing]);
//!
//! let candidate = Lead::new()
//!     .with_firm_name("Smith Law Firm")
//!     .with_attorney_name("John Smith");
//! let result = engine.is_duplicate(&candidate);
//! assert!(result.is_duplicate);
//! assert_eq!(result.reason_str(), "firm_and_attorney_match");
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod services;

pub use config::LeadmatchConfig;
pub use models::Lead;
pub use services::deduplication::{
    DeduplicationConfig, DeduplicationEngine, DeduplicationOutcome, DuplicateMatch, MatchIndex,
    MatchReason, MatchResult, NormalizedKeySet, SimilarityScorer,
};

/// Error type for leadmatch operations.
///
/// The deduplication engine itself is infallible: malformed fields normalize to
/// `None` and simply take part in no comparison. Errors only come from the
/// edges (reading lead files, parsing configuration, installing telemetry).
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Unknown file format, CSV without identity columns, malformed JSON, bad config values |
/// | `OperationFailed` | File I/O errors, TOML parse failures, subscriber/recorder installation |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for leadmatch operations.
pub type Result<T> = std::result::Result<T, Error>;
