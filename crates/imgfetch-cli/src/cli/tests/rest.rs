//! Tests for ledger, verify, fingerprint, completions and man.

use super::{parse, Cli};
use crate::cli::CliCommand;
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_ledger() {
    match parse(&["imgfetch", "ledger"]).command {
        Some(CliCommand::Ledger) => {}
        other => panic!("expected Ledger, got {:?}", other),
    }
}

#[test]
fn cli_parse_verify_with_dir() {
    let cli = parse(&["imgfetch", "verify", "--output-dir", "shots"]);
    assert!(matches!(cli.command, Some(CliCommand::Verify)));
    assert_eq!(cli.output_dir.as_deref(), Some(Path::new("shots")));
}

#[test]
fn cli_parse_fingerprint() {
    match parse(&["imgfetch", "fingerprint", "Fetched_Images/photo.jpg"]).command {
        Some(CliCommand::Fingerprint { path }) => {
            assert_eq!(path, Path::new("Fetched_Images/photo.jpg"));
        }
        other => panic!("expected Fingerprint, got {:?}", other),
    }
}

#[test]
fn cli_parse_fingerprint_requires_path() {
    assert!(Cli::try_parse_from(["imgfetch", "fingerprint"]).is_err());
}

#[test]
fn cli_parse_completions() {
    match parse(&["imgfetch", "completions", "bash"]).command {
        Some(CliCommand::Completions { shell }) => {
            assert_eq!(shell, clap_complete::Shell::Bash);
        }
        other => panic!("expected Completions, got {:?}", other),
    }
    assert!(Cli::try_parse_from(["imgfetch", "completions", "cmd.exe"]).is_err());
}

#[test]
fn cli_parse_man() {
    assert!(matches!(
        parse(&["imgfetch", "man"]).command,
        Some(CliCommand::Man)
    ));
}
