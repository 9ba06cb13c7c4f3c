//! `urlcanon batch` – canonicalize a record stream.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use urlcanon_core::batch::{self, BatchStats, FailurePolicy, LineSink};
use urlcanon_core::config::{CanonConfig, InputFormat};

/// Effective batch settings: config file values with CLI overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub format: InputFormat,
    pub field: String,
    pub on_error: FailurePolicy,
    pub jobs: usize,
    pub chunk_size: usize,
}

impl BatchOptions {
    pub fn from_config(cfg: &CanonConfig) -> Self {
        Self {
            format: cfg.input_format,
            field: cfg.url_field.clone(),
            on_error: cfg.on_error,
            jobs: cfg.jobs,
            chunk_size: cfg.chunk_size,
        }
    }

    pub fn with_overrides(
        mut self,
        format: Option<InputFormat>,
        field: Option<String>,
        on_error: Option<FailurePolicy>,
        jobs: Option<usize>,
        chunk_size: Option<usize>,
    ) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        if let Some(field) = field {
            self.field = field;
        }
        if let Some(on_error) = on_error {
            self.on_error = on_error;
        }
        if let Some(jobs) = jobs {
            self.jobs = jobs;
        }
        if let Some(chunk_size) = chunk_size {
            self.chunk_size = chunk_size;
        }
        self
    }
}

/// Reads records from `input` (or stdin) and writes canonical URLs to stdout.
pub async fn run_batch(input: Option<&Path>, opts: &BatchOptions) -> Result<BatchStats> {
    let stdout = io::stdout();
    let stats = run_batch_to(input, opts, stdout.lock()).await?;

    let failures = stats.parse_failures + stats.record_failures;
    if failures > 0 {
        eprintln!(
            "urlcanon: {} of {} record(s) skipped ({} unparsable, {} without URL)",
            failures, stats.records, stats.parse_failures, stats.record_failures
        );
    }
    Ok(stats)
}

pub(crate) async fn run_batch_to<W: Write>(
    input: Option<&Path>,
    opts: &BatchOptions,
    out: W,
) -> Result<BatchStats> {
    let records = match input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            batch::open_source(opts.format, &opts.field, BufReader::new(file))
        }
        None => batch::open_source(opts.format, &opts.field, BufReader::new(io::stdin())),
    };
    tracing::debug!(
        format = ?opts.format,
        field = %opts.field,
        on_error = %opts.on_error,
        jobs = opts.jobs,
        "starting batch"
    );

    let mut sink = LineSink::new(out);
    let stats = batch::run_parallel(records, &mut sink, opts.on_error, opts.jobs, opts.chunk_size)
        .await
        .context("batch canonicalization stopped")?;
    Ok(stats)
}
