//! Errors raised around the canonicalizer: reading records and writing output.

use std::io;

use thiserror::Error;

use crate::url_model::ParseError;

/// A record could not yield a URL. Distinct from [`ParseError`], which is
/// about the URL itself.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record has no usable value for the URL field.
    #[error("record {record}: missing field {field:?}")]
    MissingField { record: u64, field: String },
    /// The record is not well-formed for its input format.
    #[error("record {record}: {reason}")]
    Malformed { record: u64, reason: String },
    /// Reading the input stream failed.
    #[error("read input: {0}")]
    Io(#[from] io::Error),
}

/// Why a batch run stopped early.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A URL failed to parse under the `halt` policy.
    #[error("record {record}: {source}")]
    Halted { record: u64, source: ParseError },
    /// A record failed under the `halt` policy, or the input stream broke.
    #[error(transparent)]
    Record(RecordError),
    /// Writing canonical output failed.
    #[error("write output: {0}")]
    Sink(#[source] io::Error),
    /// A worker task panicked or was cancelled.
    #[error("worker task failed: {0}")]
    Worker(String),
}
