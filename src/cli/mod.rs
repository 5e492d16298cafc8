//! CLI command implementations.
//!
//! This module provides the command-line interface for leadmatch. Each
//! submodule implements a specific CLI command; argument parsing lives in the
//! binary.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Check one lead against an existing population |
//! | `dedupe` | Partition a batch into unique and duplicate leads |
//! | `keys` | Show the normalized comparison keys of a lead |
//!
//! # Example Usage
//!
//! ```bash
//! # Is this lead already known?
//! leadmatch check --existing leads.json --firm "Smith Law Firm" --attorney "John Smith"
//!
//! # Accept a scraped batch
//! leadmatch dedupe --existing leads.json --input scraped.csv --output accepted.json
//!
//! # Debug normalization
//! leadmatch keys --firm "Johnson & Associates, P.C." --phone "+1 202 555 0100"
//! ```

mod check;
mod dedupe;
mod keys;

pub use check::{CheckCommand, format_verdict};
pub use dedupe::{DedupeCommand, DedupeSummary};
pub use keys::{KeysCommand, format_keys};
