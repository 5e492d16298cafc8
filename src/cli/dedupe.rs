//! Dedupe CLI command.
//!
//! Runs batch deduplication of an input file against an optional existing
//! population, writes the accepted leads for the persistence layer, and
//! optionally a report of the rejected ones.

use crate::io::{read_leads, write_duplicate_report, write_leads};
use crate::models::Lead;
use crate::services::deduplication::{DeduplicationConfig, DeduplicationEngine};
use crate::Result;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Dedupe command handler.
#[derive(Debug, Clone)]
pub struct DedupeCommand {
    /// File holding the known leads; an empty population when absent.
    pub existing: Option<PathBuf>,
    /// File holding the new batch.
    pub input: PathBuf,
    /// Where to write the unique leads.
    pub output: Option<PathBuf>,
    /// Where to write the JSON duplicate report.
    pub duplicates: Option<PathBuf>,
    /// Deduplication policy.
    pub config: DeduplicationConfig,
}

/// Result of a dedupe run.
#[derive(Debug, Clone)]
pub struct DedupeSummary {
    /// Leads accepted as unique, in input order.
    pub unique: Vec<Arc<Lead>>,
    /// Number of leads rejected as duplicates.
    pub duplicates: usize,
}

impl DedupeSummary {
    /// Number of leads processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.unique.len() + self.duplicates
    }
}

impl fmt::Display for DedupeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} unique, {} duplicates from {} total",
            self.unique.len(),
            self.duplicates,
            self.total()
        )
    }
}

impl DedupeCommand {
    /// Creates a new dedupe command for an input file.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, config: DeduplicationConfig) -> Self {
        Self {
            existing: None,
            input: input.into(),
            output: None,
            duplicates: None,
            config,
        }
    }

    /// Sets the existing population file.
    #[must_use]
    pub fn with_existing(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing = Some(path.into());
        self
    }

    /// Sets the output file for unique leads.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Sets the duplicate report file.
    #[must_use]
    pub fn with_duplicates(mut self, path: impl Into<PathBuf>) -> Self {
        self.duplicates = Some(path.into());
        self
    }

    /// Executes the batch.
    ///
    /// # Errors
    ///
    /// Returns an error if an input file cannot be read or an output file
    /// cannot be written.
    pub fn run(&self) -> Result<DedupeSummary> {
        let existing = match &self.existing {
            Some(path) => read_leads(path)?,
            None => Vec::new(),
        };
        let batch = read_leads(&self.input)?;

        let mut engine = DeduplicationEngine::with_config(existing, self.config.clone());
        let outcome = engine.deduplicate_list(batch);

        if let Some(path) = &self.output {
            write_leads(path, &outcome.unique)?;
        }
        if let Some(path) = &self.duplicates {
            write_duplicate_report(path, &outcome.duplicates)?;
        }

        Ok(DedupeSummary {
            duplicates: outcome.duplicates.len(),
            unique: outcome.unique,
        })
    }
}
