//! Tests for canon, explain, config, completions and man.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;
use clap_complete::Shell;

#[test]
fn cli_parse_canon_multiple() {
    match parse(&["urlcanon", "canon", "https://a.com/", "https://b.com/"]) {
        CliCommand::Canon { urls } => assert_eq!(urls, vec!["https://a.com/", "https://b.com/"]),
        _ => panic!("expected Canon"),
    }
}

#[test]
fn cli_parse_canon_requires_url() {
    assert!(super::Cli::try_parse_from(["urlcanon", "canon"]).is_err());
}

#[test]
fn cli_parse_explain() {
    match parse(&["urlcanon", "explain", "https://youtu.be/x"]) {
        CliCommand::Explain { url } => assert_eq!(url, "https://youtu.be/x"),
        _ => panic!("expected Explain"),
    }
}

#[test]
fn cli_parse_config() {
    match parse(&["urlcanon", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["urlcanon", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    match parse(&["urlcanon", "man"]) {
        CliCommand::Man => {}
        _ => panic!("expected Man"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    super::Cli::command().debug_assert();
}
