//! CLI for the urlcanon URL canonicalizer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use urlcanon_core::batch::FailurePolicy;
use urlcanon_core::config::{self, InputFormat};

use commands::{
    run_batch, run_canon, run_completions, run_config, run_explain, run_man, BatchOptions,
};

/// Top-level CLI for urlcanon.
#[derive(Debug, Parser)]
#[command(name = "urlcanon")]
#[command(about = "urlcanon: reduce equivalent URLs to one canonical string", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the canonical form of each URL, one per line.
    Canon {
        /// URLs to canonicalize.
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Canonicalize a stream of records (stdin or --input) to stdout.
    Batch {
        /// Read records from this file instead of stdin.
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
        /// Record format: csv, ndjson or lines (default from config).
        #[arg(long, value_name = "FORMAT")]
        format: Option<InputFormat>,
        /// Record field holding the URL (default from config).
        #[arg(long, value_name = "NAME")]
        field: Option<String>,
        /// On a failing record: skip, log or halt (default from config).
        #[arg(long, value_name = "POLICY")]
        on_error: Option<FailurePolicy>,
        /// Canonicalize on N worker tasks (output order is preserved).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
        /// Records per worker chunk.
        #[arg(long, value_name = "N")]
        chunk_size: Option<usize>,
    },

    /// Show each canonicalization step for a URL.
    Explain {
        /// URL to trace.
        url: String,
    },

    /// Show the config file path and effective configuration.
    Config,

    /// Generate shell completions on stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print a roff man page on stdout.
    Man,
}

impl CliCommand {
    /// Parses arguments and runs the command; returns the process exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Canon { urls } => Ok(run_canon(&urls)?),
            CliCommand::Batch {
                input,
                format,
                field,
                on_error,
                jobs,
                chunk_size,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let opts = BatchOptions::from_config(&cfg)
                    .with_overrides(format, field, on_error, jobs, chunk_size);
                run_batch(input.as_deref(), &opts).await?;
                Ok(0)
            }
            CliCommand::Explain { url } => Ok(run_explain(&url)?),
            CliCommand::Config => {
                run_config()?;
                Ok(0)
            }
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(0)
            }
            CliCommand::Man => {
                run_man()?;
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests;
