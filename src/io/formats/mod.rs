//! Format adapters for import/export.
//!
//! Each format implements [`ImportSource`] and [`ExportSink`].

pub mod csv;
pub mod json;

use crate::{Error, Result};
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use super::traits::{ExportSink, ImportSource};

/// Supported file formats for import/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON format (newline-delimited or array).
    Json,
    /// CSV format with header aliases.
    Csv,
}

impl Format {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Detects format from file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("json" | "ndjson" | "jsonl") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some(ext) => Err(Error::InvalidInput(format!(
                "Unsupported file extension: .{ext}"
            ))),
            None => Err(Error::InvalidInput(
                "Cannot determine format: file has no extension".to_string(),
            )),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" | "ndjson" | "jsonl" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::InvalidInput(format!("Unknown format: {s}"))),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Creates an import source for the given format and reader.
///
/// # Errors
///
/// Returns an error if the source cannot be initialized (e.g. CSV headers
/// without an identity column).
pub fn create_import_source<'a, R: BufRead + 'a>(
    reader: R,
    format: Format,
) -> Result<Box<dyn ImportSource + 'a>> {
    match format {
        Format::Json => Ok(Box::new(json::JsonImportSource::new(reader))),
        Format::Csv => Ok(Box::new(csv::CsvImportSource::new(reader)?)),
    }
}

/// Creates an export sink for the given format and writer.
#[must_use]
pub fn create_export_sink<'a, W: Write + 'a>(writer: W, format: Format) -> Box<dyn ExportSink + 'a> {
    match format {
        Format::Json => Box::new(json::JsonExportSink::new(writer)),
        Format::Csv => Box::new(csv::CsvExportSink::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(Format::from_str("json").unwrap(), Format::Json);
        assert_eq!(Format::from_str("NDJSON").unwrap(), Format::Json);
        assert_eq!(Format::from_str("csv").unwrap(), Format::Csv);
        assert!(Format::from_str("yaml").is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("leads.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("leads.JSONL")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("leads.csv")).unwrap(), Format::Csv);
        assert!(Format::from_path(Path::new("leads.txt")).is_err());
        assert!(Format::from_path(Path::new("leads")).is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(Format::Json.to_string(), "json");
        assert_eq!(Format::Csv.to_string(), "csv");
    }
}
