//! CSV format adapter for import/export.
//!
//! Headers are matched case-insensitively, with spaces and dashes treated as
//! underscores, so `Firm Name`, `firm-name` and `firm_name` all map to the
//! firm name. Unknown columns are ignored and empty cells are absent.

use crate::io::traits::{ExportSink, ImportSource};
use crate::models::Lead;
use crate::{Error, Result};
use std::io::{BufRead, Write};

/// Columns written by [`CsvExportSink`], in order.
pub const EXPORT_HEADERS: [&str; 16] = [
    "id",
    "firm_name",
    "attorney_name",
    "attorney_title",
    "attorney_email",
    "attorney_phone",
    "firm_website",
    "practice_areas",
    "address",
    "city",
    "state",
    "zip_code",
    "source_url",
    "source_name",
    "confidence_score",
    "notes",
];

/// CSV import source.
///
/// First row is expected to be headers.
pub struct CsvImportSource<R: BufRead> {
    /// CSV reader.
    reader: csv::Reader<R>,
    /// Column indices for each field.
    column_map: ColumnMap,
}

/// Maps CSV column indices to lead fields.
#[derive(Debug, Default)]
struct ColumnMap {
    id: Option<usize>,
    firm_name: Option<usize>,
    attorney_name: Option<usize>,
    attorney_title: Option<usize>,
    email: Option<usize>,
    phone: Option<usize>,
    website: Option<usize>,
    practice_areas: Option<usize>,
    address: Option<usize>,
    city: Option<usize>,
    state: Option<usize>,
    zip_code: Option<usize>,
    source_url: Option<usize>,
    source_name: Option<usize>,
    confidence_score: Option<usize>,
    notes: Option<usize>,
}

impl ColumnMap {
    /// Creates a column map from CSV headers.
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let mut map = Self::default();

        for (i, header) in headers.iter().enumerate() {
            let key = header.trim().to_lowercase().replace([' ', '-'], "_");
            let slot = match key.as_str() {
                "id" => &mut map.id,
                "firm_name" | "firm" | "company" => &mut map.firm_name,
                "attorney_name" | "attorney" | "name" => &mut map.attorney_name,
                "attorney_title" | "title" => &mut map.attorney_title,
                "attorney_email" | "email" => &mut map.email,
                "attorney_phone" | "phone" => &mut map.phone,
                "firm_website" | "website" => &mut map.website,
                "practice_areas" | "practice_area" => &mut map.practice_areas,
                "address" => &mut map.address,
                "city" => &mut map.city,
                "state" => &mut map.state,
                "zip_code" | "zip" => &mut map.zip_code,
                "source_url" => &mut map.source_url,
                "source_name" | "source" => &mut map.source_name,
                "confidence_score" | "confidence" => &mut map.confidence_score,
                "notes" => &mut map.notes,
                _ => continue, // Ignore unknown columns
            };
            if slot.is_none() {
                *slot = Some(i);
            }
        }

        let has_identity = [
            map.firm_name,
            map.attorney_name,
            map.email,
            map.phone,
            map.website,
        ]
        .iter()
        .any(Option::is_some);
        if !has_identity {
            return Err(Error::InvalidInput(
                "CSV must have at least one of the columns firm_name, attorney_name, email, phone, website"
                    .to_string(),
            ));
        }

        Ok(map)
    }
}

impl<R: BufRead> CsvImportSource<R> {
    /// Creates a new CSV import source.
    ///
    /// # Errors
    ///
    /// Returns an error if headers cannot be read or no identity column is present.
    pub fn new(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // Allow varying number of fields
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::OperationFailed {
                operation: "read_csv_headers".to_string(),
                cause: e.to_string(),
            })?
            .clone();
        let column_map = ColumnMap::from_headers(&headers)?;

        Ok(Self {
            reader: csv_reader,
            column_map,
        })
    }

    /// Parses a record into a lead.
    fn parse_record(&self, record: &csv::StringRecord) -> Lead {
        let get_field = |idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        let map = &self.column_map;

        Lead {
            id: get_field(map.id).and_then(|s| s.parse::<u64>().ok()),
            firm_name: get_field(map.firm_name),
            firm_website: get_field(map.website),
            attorney_name: get_field(map.attorney_name),
            attorney_title: get_field(map.attorney_title),
            attorney_email: get_field(map.email),
            attorney_phone: get_field(map.phone),
            practice_areas: get_field(map.practice_areas),
            address: get_field(map.address),
            city: get_field(map.city),
            state: get_field(map.state),
            zip_code: get_field(map.zip_code),
            source_url: get_field(map.source_url),
            source_name: get_field(map.source_name),
            confidence_score: get_field(map.confidence_score)
                .and_then(|s| s.parse::<f64>().ok()),
            notes: get_field(map.notes),
            extra: std::collections::BTreeMap::new(),
        }
    }
}

impl<R: BufRead> ImportSource for CsvImportSource<R> {
    fn next(&mut self) -> Result<Option<Lead>> {
        let mut record = csv::StringRecord::new();

        let has_record = self
            .reader
            .read_record(&mut record)
            .map_err(|e| Error::OperationFailed {
                operation: "read_csv".to_string(),
                cause: e.to_string(),
            })?;
        if !has_record {
            return Ok(None);
        }

        Ok(Some(self.parse_record(&record)))
    }
}

/// CSV export sink.
///
/// Writes leads under the fixed [`EXPORT_HEADERS`]. Fields kept in
/// [`Lead::extra`] are not exported.
pub struct CsvExportSink<W: Write> {
    writer: csv::Writer<W>,
    /// Whether headers have been written.
    headers_written: bool,
}

impl<W: Write> CsvExportSink<W> {
    /// Creates a new CSV export sink.
    #[must_use]
    pub fn new(writer: W) -> Self {
        let csv_writer = csv::WriterBuilder::new()
            .has_headers(false) // We write headers manually
            .from_writer(writer);

        Self {
            writer: csv_writer,
            headers_written: false,
        }
    }

    /// Writes headers if not already written.
    fn ensure_headers(&mut self) -> Result<()> {
        if !self.headers_written {
            self.writer
                .write_record(EXPORT_HEADERS)
                .map_err(|e| Error::OperationFailed {
                    operation: "write_csv_headers".to_string(),
                    cause: e.to_string(),
                })?;
            self.headers_written = true;
        }
        Ok(())
    }
}

impl<W: Write> ExportSink for CsvExportSink<W> {
    fn write(&mut self, lead: &Lead) -> Result<()> {
        self.ensure_headers()?;

        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        self.writer
            .write_record([
                lead.id.map(|id| id.to_string()).unwrap_or_default(),
                text(&lead.firm_name),
                text(&lead.attorney_name),
                text(&lead.attorney_title),
                text(&lead.attorney_email),
                text(&lead.attorney_phone),
                text(&lead.firm_website),
                text(&lead.practice_areas),
                text(&lead.address),
                text(&lead.city),
                text(&lead.state),
                text(&lead.zip_code),
                text(&lead.source_url),
                text(&lead.source_name),
                lead.confidence_score
                    .map(|score| score.to_string())
                    .unwrap_or_default(),
                text(&lead.notes),
            ])
            .map_err(|e| Error::OperationFailed {
                operation: "write_csv".to_string(),
                cause: e.to_string(),
            })?;

        Ok(())
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        // An empty export still gets a header row.
        self.ensure_headers()?;
        self.writer.flush().map_err(|e| Error::OperationFailed {
            operation: "flush_csv".to_string(),
            cause: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &str) -> Result<Vec<Lead>> {
        let mut source = CsvImportSource::new(Cursor::new(input.to_string()))?;
        let mut leads = Vec::new();
        while let Some(lead) = source.next()? {
            leads.push(lead);
        }
        Ok(leads)
    }

    #[test]
    fn test_import_with_header_aliases() {
        let input = "Firm Name,Attorney Name,Email,Phone,Website,Zip,Segment\n\
                     Smith Law Firm LLC,\"John Smith, Esq.\",john@smithlaw.com,(202) 555-0100,smithlaw.com,20001,probate\n";
        let leads = read_all(input).unwrap();

        assert_eq!(leads.len(), 1);
        let lead = &leads[0];
        assert_eq!(lead.firm_name.as_deref(), Some("Smith Law Firm LLC"));
        assert_eq!(lead.attorney_name.as_deref(), Some("John Smith, Esq."));
        assert_eq!(lead.attorney_email.as_deref(), Some("john@smithlaw.com"));
        assert_eq!(lead.attorney_phone.as_deref(), Some("(202) 555-0100"));
        assert_eq!(lead.firm_website.as_deref(), Some("smithlaw.com"));
        assert_eq!(lead.zip_code.as_deref(), Some("20001"));
    }

    #[test]
    fn test_empty_cells_are_absent() {
        let input = "firm,attorney,email\nAlpha Legal,,  \n";
        let leads = read_all(input).unwrap();

        assert_eq!(leads[0].firm_name.as_deref(), Some("Alpha Legal"));
        assert!(leads[0].attorney_name.is_none());
        assert!(leads[0].attorney_email.is_none());
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let input = "firm_name,attorney_name,city\nAlpha Legal\n";
        let leads = read_all(input).unwrap();
        assert_eq!(leads[0].firm_name.as_deref(), Some("Alpha Legal"));
        assert!(leads[0].city.is_none());
    }

    #[test]
    fn test_requires_identity_column() {
        let err = read_all("city,state\nWashington,DC\n").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_export_writes_fixed_header() {
        let mut out = Vec::new();
        {
            let mut sink = Box::new(CsvExportSink::new(&mut out));
            sink.write(
                &Lead::new()
                    .with_firm_name("Johnson & Associates, P.C.")
                    .with_phone("202.555.0100"),
            )
            .unwrap();
            sink.finalize().unwrap();
        }

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(EXPORT_HEADERS.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some(",\"Johnson & Associates, P.C.\",,,,202.555.0100,,,,,,,,,,")
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut out = Vec::new();
        Box::new(CsvExportSink::new(&mut out)).finalize().unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim_end(), EXPORT_HEADERS.join(","));
    }
}
