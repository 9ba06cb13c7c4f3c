//! Tests for the batch subcommand.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;
use urlcanon_core::batch::FailurePolicy;
use urlcanon_core::config::InputFormat;

#[test]
fn cli_parse_batch_defaults() {
    match parse(&["urlcanon", "batch"]) {
        CliCommand::Batch {
            input,
            format,
            field,
            on_error,
            jobs,
            chunk_size,
        } => {
            assert!(input.is_none());
            assert!(format.is_none());
            assert!(field.is_none());
            assert!(on_error.is_none());
            assert!(jobs.is_none());
            assert!(chunk_size.is_none());
        }
        _ => panic!("expected Batch"),
    }
}

#[test]
fn cli_parse_batch_all_flags() {
    match parse(&[
        "urlcanon",
        "batch",
        "--input",
        "/tmp/hn.csv",
        "--format",
        "ndjson",
        "--field",
        "link",
        "--on-error",
        "halt",
        "--jobs",
        "4",
        "--chunk-size",
        "128",
    ]) {
        CliCommand::Batch {
            input,
            format,
            field,
            on_error,
            jobs,
            chunk_size,
        } => {
            assert_eq!(input.as_deref(), Some(std::path::Path::new("/tmp/hn.csv")));
            assert_eq!(format, Some(InputFormat::Ndjson));
            assert_eq!(field.as_deref(), Some("link"));
            assert_eq!(on_error, Some(FailurePolicy::Halt));
            assert_eq!(jobs, Some(4));
            assert_eq!(chunk_size, Some(128));
        }
        _ => panic!("expected Batch with flags"),
    }
}

#[test]
fn cli_parse_batch_rejects_unknown_format() {
    assert!(super::Cli::try_parse_from(["urlcanon", "batch", "--format", "xml"]).is_err());
}

#[test]
fn cli_parse_batch_rejects_unknown_policy() {
    assert!(super::Cli::try_parse_from(["urlcanon", "batch", "--on-error", "retry"]).is_err());
}
