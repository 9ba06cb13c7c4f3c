//! Sequential batch driver.

use super::error::{BatchError, RecordError};
use super::policy::FailurePolicy;
use super::sink::OutputSink;
use crate::url_model::{canonicalize_url, ParseError};

/// Counters for one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    /// Records read from the source (including failed ones).
    pub records: u64,
    /// Canonical URLs written to the sink.
    pub emitted: u64,
    /// Records whose URL failed to parse.
    pub parse_failures: u64,
    /// Records that did not yield a URL at all.
    pub record_failures: u64,
}

/// Applies the failure policy and writes results, strictly in record order.
pub(super) struct Driver<'a, S: OutputSink + ?Sized> {
    sink: &'a mut S,
    policy: FailurePolicy,
    stats: BatchStats,
}

impl<'a, S: OutputSink + ?Sized> Driver<'a, S> {
    pub(super) fn new(sink: &'a mut S, policy: FailurePolicy) -> Self {
        Self {
            sink,
            policy,
            stats: BatchStats::default(),
        }
    }

    /// A record failed to produce a URL. Input I/O errors always stop the run.
    pub(super) fn record_failed(&mut self, err: RecordError) -> Result<(), BatchError> {
        if let RecordError::Io(_) = err {
            return Err(BatchError::Record(err));
        }
        self.stats.records += 1;
        self.stats.record_failures += 1;
        if self.policy.tolerate(self.stats.records, &err) {
            Ok(())
        } else {
            Err(BatchError::Record(err))
        }
    }

    /// Emits a canonical URL, or applies the policy to its parse error.
    pub(super) fn canonicalized(&mut self, result: Result<String, ParseError>) -> Result<(), BatchError> {
        self.stats.records += 1;
        match result {
            Ok(canonical) => {
                self.sink.emit(&canonical).map_err(BatchError::Sink)?;
                self.stats.emitted += 1;
                Ok(())
            }
            Err(source) => {
                self.stats.parse_failures += 1;
                let record = self.stats.records;
                if self.policy.tolerate(record, &source) {
                    Ok(())
                } else {
                    Err(BatchError::Halted { record, source })
                }
            }
        }
    }

    pub(super) fn finish(self) -> Result<BatchStats, BatchError> {
        self.sink.finish().map_err(BatchError::Sink)?;
        let stats = self.stats;
        tracing::info!(
            records = stats.records,
            emitted = stats.emitted,
            parse_failures = stats.parse_failures,
            record_failures = stats.record_failures,
            "batch complete"
        );
        Ok(stats)
    }
}

/// Canonicalizes every record in order, writing one URL per record to `sink`.
///
/// Failing records are handled per `policy`; the sink is flushed once all
/// records are processed.
pub fn run_sequential<I, S>(records: I, sink: &mut S, policy: FailurePolicy) -> Result<BatchStats, BatchError>
where
    I: IntoIterator<Item = Result<String, RecordError>>,
    S: OutputSink + ?Sized,
{
    let mut driver = Driver::new(sink, policy);
    for item in records {
        match item {
            Ok(url) => driver.canonicalized(canonicalize_url(&url))?,
            Err(e) => driver.record_failed(e)?,
        }
    }
    driver.finish()
}
