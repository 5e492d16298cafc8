//! Data models for leadmatch.

mod lead;

pub use lead::Lead;
