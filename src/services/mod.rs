//! Business logic services.
//!
//! Services hold the in-memory state of a run and provide high-level operations.

pub mod deduplication;
