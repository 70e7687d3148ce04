//! CLI for the imgfetch image collector.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use imgfetch_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_fetch, run_fingerprint, run_ledger, run_man, run_verify};

/// Top-level CLI for imgfetch.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "Fetch images from the web, skipping ones already collected", long_about = None)]
pub struct Cli {
    /// Store images and the ledger in DIR instead of the configured output directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Defaults to an interactive `fetch`.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch images. Prompts for a comma-separated list when no URL is given.
    Fetch {
        /// Image URLs; each argument may itself be a comma-separated list.
        urls: Vec<String>,
    },

    /// List the fingerprint ledger.
    Ledger,

    /// Check that every ledger entry still matches its file on disk.
    Verify,

    /// Print the content fingerprint (MD5) of a file.
    Fingerprint {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print a man page (roff).
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let command = cli.command.unwrap_or(CliCommand::Fetch { urls: Vec::new() });

        // Commands that never touch the output directory skip config loading.
        match command {
            CliCommand::Fingerprint { path } => return run_fingerprint(&path),
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = config::load_or_init()?.with_output_dir(cli.output_dir.as_deref());
        tracing::debug!("loaded config: {:?}", cfg);

        match command {
            CliCommand::Fetch { urls } => run_fetch(&cfg, &urls)?,
            CliCommand::Ledger => run_ledger(&cfg)?,
            CliCommand::Verify => run_verify(&cfg)?,
            CliCommand::Fingerprint { .. } | CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
