//! Core traits for import/export operations.
//!
//! Defines the [`ImportSource`] and [`ExportSink`] traits that format adapters
//! implement to support different file formats.

use crate::Result;
use crate::models::Lead;

/// A source of leads read from an external format.
pub trait ImportSource {
    /// Returns the next lead, or `None` when the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails or a record is malformed.
    fn next(&mut self) -> Result<Option<Lead>>;

    /// Returns the number of remaining leads, when known up front.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

/// A sink that writes leads to an external format.
pub trait ExportSink {
    /// Writes one lead.
    ///
    /// # Errors
    ///
    /// Returns an error if the lead cannot be encoded or written.
    fn write(&mut self, lead: &Lead) -> Result<()>;

    /// Flushes buffered output and closes the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    fn finalize(self: Box<Self>) -> Result<()>;
}
