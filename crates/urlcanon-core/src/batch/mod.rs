//! Batch canonicalization: records in, canonical URLs out.
//!
//! The canonicalizer itself is a pure function; this module is the glue
//! around it. Sources yield raw URLs (or record-level errors), the driver
//! canonicalizes them in order and applies a [`FailurePolicy`] to failures,
//! and a sink receives one canonical URL per successful record.

mod csv;
mod error;
mod parallel;
mod policy;
mod run;
mod sink;
mod source;

pub use csv::CsvRecords;
pub use error::{BatchError, RecordError};
pub use parallel::run_parallel;
pub use policy::FailurePolicy;
pub use run::{run_sequential, BatchStats};
pub use sink::{LineSink, OutputSink};
pub use source::{open_source, LineRecords, NdjsonRecords, RecordSource};
