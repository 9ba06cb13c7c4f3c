//! Canonicalize records on several blocking worker tasks.
//!
//! Records are read in windows of `jobs * chunk_size`; each window is split
//! into chunks handed to `spawn_blocking` workers, and results are written
//! back in input order. Output is identical to [`run_sequential`].

use tokio::task::JoinSet;

use super::error::{BatchError, RecordError};
use super::policy::FailurePolicy;
use super::run::{run_sequential, BatchStats, Driver};
use super::sink::OutputSink;
use crate::url_model::{canonicalize_url, ParseError};

/// Runs the batch with up to `jobs` chunks in flight at once.
///
/// `jobs <= 1` runs sequentially on the current task. Under the `halt`
/// policy, records after the failing one may already have been
/// canonicalized but are never emitted.
pub async fn run_parallel<I, S>(
    records: I,
    sink: &mut S,
    policy: FailurePolicy,
    jobs: usize,
    chunk_size: usize,
) -> Result<BatchStats, BatchError>
where
    I: IntoIterator<Item = Result<String, RecordError>>,
    S: OutputSink + ?Sized,
{
    if jobs <= 1 {
        return run_sequential(records, sink, policy);
    }
    let chunk_size = chunk_size.max(1);
    let window_len = jobs.saturating_mul(chunk_size);

    let mut driver = Driver::new(sink, policy);
    let mut records = records.into_iter();

    loop {
        let window: Vec<Result<String, RecordError>> = records.by_ref().take(window_len).collect();
        if window.is_empty() {
            break;
        }

        let mut urls: Vec<(usize, String)> = Vec::with_capacity(window.len());
        let mut slots: Vec<Slot> = Vec::with_capacity(window.len());
        for (i, item) in window.into_iter().enumerate() {
            match item {
                Ok(url) => {
                    urls.push((i, url));
                    slots.push(Slot::Pending);
                }
                Err(e) => slots.push(Slot::Failed(e)),
            }
        }

        let mut join_set = JoinSet::new();
        let mut urls = urls.into_iter().peekable();
        while urls.peek().is_some() {
            let chunk: Vec<(usize, String)> = urls.by_ref().take(chunk_size).collect();
            join_set.spawn_blocking(move || {
                chunk
                    .into_iter()
                    .map(|(i, url)| (i, canonicalize_url(&url)))
                    .collect::<Vec<_>>()
            });
        }

        while let Some(res) = join_set.join_next().await {
            let done = res.map_err(|e| BatchError::Worker(e.to_string()))?;
            for (i, result) in done {
                slots[i] = Slot::Done(result);
            }
        }

        for slot in slots {
            match slot {
                Slot::Done(result) => driver.canonicalized(result)?,
                Slot::Failed(e) => driver.record_failed(e)?,
                Slot::Pending => {
                    return Err(BatchError::Worker("worker returned no result".to_string()))
                }
            }
        }
    }

    driver.finish()
}

enum Slot {
    Pending,
    Done(Result<String, ParseError>),
    Failed(RecordError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Result<String, RecordError>> {
        let mut items = Vec::new();
        for i in 0..50 {
            items.push(Ok(format!("https://www.site{i}.com/p/index.html?utm_source=x&id={i}")));
            items.push(Ok(format!("https://youtu.be/vid{i}?t={i}")));
            if i % 7 == 0 {
                items.push(Ok("http://[oops/".to_string()));
            }
            if i % 11 == 0 {
                items.push(Err(RecordError::MissingField {
                    record: 0,
                    field: "url".to_string(),
                }));
            }
        }
        items
    }

    #[tokio::test]
    async fn matches_sequential_output() {
        let mut seq: Vec<String> = Vec::new();
        let seq_stats = run_sequential(corpus(), &mut seq, FailurePolicy::Skip).unwrap();

        for (jobs, chunk) in [(2, 1), (4, 3), (8, 64)] {
            let mut par: Vec<String> = Vec::new();
            let par_stats = run_parallel(corpus(), &mut par, FailurePolicy::Skip, jobs, chunk)
                .await
                .unwrap();
            assert_eq!(par, seq, "jobs={jobs} chunk={chunk}");
            assert_eq!(par_stats, seq_stats);
        }
    }

    #[tokio::test]
    async fn halt_emits_only_preceding_records() {
        let items = vec![
            Ok("https://a.com/".to_string()),
            Ok("https://b.com/".to_string()),
            Ok("http://[bad/".to_string()),
            Ok("https://d.com/".to_string()),
        ];
        let mut out: Vec<String> = Vec::new();
        let err = run_parallel(items, &mut out, FailurePolicy::Halt, 4, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, BatchError::Halted { record: 3, .. }));
        assert_eq!(out, vec!["//a.com/", "//b.com/"]);
    }

    #[tokio::test]
    async fn single_job_delegates() {
        let mut out: Vec<String> = Vec::new();
        let stats = run_parallel(
            vec![Ok("https://en.m.wikipedia.org/wiki/Cat".to_string())],
            &mut out,
            FailurePolicy::Log,
            1,
            16,
        )
        .await
        .unwrap();
        assert_eq!(out, vec!["//en.wikipedia.org/wiki/Cat"]);
        assert_eq!(stats.emitted, 1);
    }
}
