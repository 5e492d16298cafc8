//! Import/Export I/O subsystem.
//!
//! Reads the initial lead population and new batches from files, and writes
//! accepted leads back out for the persistence layer.
//!
//! # Supported Formats
//!
//! | Format | Import | Export | Notes |
//! |--------|--------|--------|-------|
//! | JSON | ✓ | ✓ | Array or newline-delimited on input; pretty array on output |
//! | CSV | ✓ | ✓ | Header aliases on input; fixed header on output |
//!
//! # Example
//!
//! ```rust,no_run
//! use leadmatch::io::{read_leads, write_leads};
//! use leadmatch::DeduplicationEngine;
//! use std::path::Path;
//!
//! let existing = read_leads(Path::new("existing.json"))?;
//! let mut engine = DeduplicationEngine::new(existing);
//!
//! let outcome = engine.deduplicate_list(read_leads(Path::new("scraped.csv"))?);
//! write_leads(Path::new("accepted.json"), &outcome.unique)?;
//! # Ok::<(), leadmatch::Error>(())
//! ```

pub mod formats;
pub mod traits;

pub use formats::Format;
pub use traits::{ExportSink, ImportSource};

use crate::models::Lead;
use crate::services::deduplication::DuplicateMatch;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Reads every lead from a file, choosing the format from its extension.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, the file cannot be read,
/// or a record is malformed.
pub fn read_leads(path: &Path) -> Result<Vec<Lead>> {
    let format = Format::from_path(path)?;
    let file = File::open(path).map_err(|e| Error::OperationFailed {
        operation: "open_leads_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;

    let mut source = formats::create_import_source(BufReader::new(file), format)?;
    let mut leads = Vec::with_capacity(source.size_hint().unwrap_or_default());
    while let Some(lead) = source.next()? {
        leads.push(lead);
    }

    tracing::debug!(
        path = %path.display(),
        format = %format,
        count = leads.len(),
        "Read leads"
    );
    Ok(leads)
}

/// Writes leads to a file, choosing the format from its extension.
///
/// # Errors
///
/// Returns an error if the extension is unsupported or the file cannot be written.
pub fn write_leads<L: AsRef<Lead>>(path: &Path, leads: &[L]) -> Result<()> {
    let format = Format::from_path(path)?;
    let file = create_file(path)?;

    let mut sink = formats::create_export_sink(BufWriter::new(file), format);
    for lead in leads {
        sink.write(lead.as_ref())?;
    }
    sink.finalize()?;

    tracing::debug!(
        path = %path.display(),
        format = %format,
        count = leads.len(),
        "Wrote leads"
    );
    Ok(())
}

/// Writes a JSON report of rejected leads and what they matched.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_duplicate_report(path: &Path, duplicates: &[DuplicateMatch]) -> Result<()> {
    let mut writer = BufWriter::new(create_file(path)?);
    serde_json::to_writer_pretty(&mut writer, duplicates).map_err(|e| Error::OperationFailed {
        operation: "write_duplicate_report".to_string(),
        cause: e.to_string(),
    })?;
    writer.flush().map_err(|e| Error::OperationFailed {
        operation: "write_duplicate_report".to_string(),
        cause: e.to_string(),
    })
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::OperationFailed {
        operation: "create_output_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })
}
