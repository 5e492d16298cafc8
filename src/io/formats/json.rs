//! JSON format adapter for import/export.
//!
//! Supports both newline-delimited JSON (NDJSON/JSONL) and JSON arrays on
//! input. Output is always a pretty-printed array.

use crate::io::traits::{ExportSink, ImportSource};
use crate::models::Lead;
use crate::{Error, Result};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// JSON import source.
///
/// Automatically detects and handles both formats:
/// - **NDJSON/JSONL**: One JSON object per line
/// - **Array**: A JSON array of objects `[{...}, {...}]`
pub struct JsonImportSource<R: BufRead> {
    reader: R,
    /// Leads parsed ahead of the caller.
    buffer: VecDeque<Lead>,
    /// Whether we've detected and started parsing.
    started: bool,
    /// Whether we're in array mode.
    array_mode: bool,
    /// Line number for error reporting.
    line_number: usize,
}

impl<R: BufRead> JsonImportSource<R> {
    /// Creates a new JSON import source.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: VecDeque::new(),
            started: false,
            array_mode: false,
            line_number: 0,
        }
    }

    /// Reads the next non-blank line, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        loop {
            line.clear();
            let bytes_read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| Error::OperationFailed {
                    operation: "read_json".to_string(),
                    cause: e.to_string(),
                })?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
    }

    /// Peeks at the first non-blank line to detect the layout.
    fn detect_format(&mut self) -> Result<()> {
        self.started = true;
        let Some(first_line) = self.next_line()? else {
            return Ok(());
        };

        if first_line.trim_start().starts_with('[') {
            self.array_mode = true;
            let mut remaining = String::new();
            self.reader
                .read_to_string(&mut remaining)
                .map_err(|e| Error::OperationFailed {
                    operation: "read_json".to_string(),
                    cause: e.to_string(),
                })?;

            let leads: Vec<Lead> = serde_json::from_str(&format!("{first_line}{remaining}"))
                .map_err(|e| Error::InvalidInput(format!("Failed to parse JSON array: {e}")))?;
            self.buffer = leads.into();
        } else {
            let lead = self.parse_line(&first_line)?;
            self.buffer.push_back(lead);
        }

        Ok(())
    }

    fn parse_line(&self, line: &str) -> Result<Lead> {
        serde_json::from_str(line.trim()).map_err(|e| {
            Error::InvalidInput(format!(
                "Line {}: Failed to parse JSON object: {e}",
                self.line_number
            ))
        })
    }
}

impl<R: BufRead> ImportSource for JsonImportSource<R> {
    fn next(&mut self) -> Result<Option<Lead>> {
        if !self.started {
            self.detect_format()?;
        }

        if let Some(lead) = self.buffer.pop_front() {
            return Ok(Some(lead));
        }
        if self.array_mode {
            return Ok(None);
        }

        match self.next_line()? {
            Some(line) => self.parse_line(&line).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.array_mode.then_some(self.buffer.len())
    }
}

/// JSON export sink.
///
/// Collects leads and writes them as one pretty-printed array on finalize.
pub struct JsonExportSink<W: Write> {
    writer: W,
    leads: Vec<serde_json::Value>,
}

impl<W: Write> JsonExportSink<W> {
    /// Creates a new JSON export sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            leads: Vec::new(),
        }
    }
}

impl<W: Write> ExportSink for JsonExportSink<W> {
    fn write(&mut self, lead: &Lead) -> Result<()> {
        let value = serde_json::to_value(lead).map_err(|e| Error::OperationFailed {
            operation: "serialize_json".to_string(),
            cause: e.to_string(),
        })?;
        self.leads.push(value);
        Ok(())
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.leads).map_err(|e| {
            Error::OperationFailed {
                operation: "write_json".to_string(),
                cause: e.to_string(),
            }
        })?;
        writeln!(self.writer)
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::OperationFailed {
                operation: "flush_json".to_string(),
                cause: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &str) -> Result<Vec<Lead>> {
        let mut source = JsonImportSource::new(Cursor::new(input.to_string()));
        let mut leads = Vec::new();
        while let Some(lead) = source.next()? {
            leads.push(lead);
        }
        Ok(leads)
    }

    #[test]
    fn test_import_array() {
        let input = r#"[
  {"firm_name": "Alpha Legal", "email": "ann@alphalegal.com"},
  {"firm_name": "Beta Law", "phone": "202-555-0100"}
]"#;
        let leads = read_all(input).unwrap();

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].attorney_email.as_deref(), Some("ann@alphalegal.com"));
        assert_eq!(leads[1].attorney_phone.as_deref(), Some("202-555-0100"));
    }

    #[test]
    fn test_import_ndjson_skips_blank_lines() {
        let input = "{\"firm_name\": \"Alpha Legal\"}\n\n{\"firm_name\": \"Beta Law\"}\n";
        let leads = read_all(input).unwrap();

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[1].firm_name.as_deref(), Some("Beta Law"));
    }

    #[test]
    fn test_import_empty() {
        assert!(read_all("").unwrap().is_empty());
        assert!(read_all("\n  \n").unwrap().is_empty());
        assert!(read_all("[]").unwrap().is_empty());
    }

    #[test]
    fn test_import_reports_bad_line() {
        let input = "{\"firm_name\": \"Alpha Legal\"}\n{not json}\n";
        let err = read_all(input).unwrap_err();
        assert!(err.to_string().contains("Line 2"));
    }

    #[test]
    fn test_export_pretty_array() {
        let mut out = Vec::new();
        {
            let mut sink = Box::new(JsonExportSink::new(&mut out));
            sink.write(&Lead::new().with_firm_name("Alpha Legal")).unwrap();
            sink.finalize().unwrap();
        }

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[\n"));
        let back: Vec<Lead> = serde_json::from_str(&text).unwrap();
        assert_eq!(back[0].firm_name.as_deref(), Some("Alpha Legal"));
    }
}
