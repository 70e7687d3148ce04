//! Fetch pipeline: probe → policy checks → download → fingerprint → dedup → persist.
//!
//! URLs are processed one at a time. Each URL ends in exactly one
//! [`UrlOutcome`]; nothing that goes wrong for one URL stops the others.

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{CollisionPolicy, FetchConfig};
use crate::console::{confirm, Console};
use crate::error::FetchError;
use crate::fingerprint::Fingerprint;
use crate::ledger::{Ledger, LedgerEntry};
use crate::probe::ProbeResult;
use crate::{download, probe, storage, url_model};

/// HTTP capability the pipeline needs.
pub trait Fetcher {
    /// Header-only request.
    fn probe(&self, url: &str) -> Result<ProbeResult, FetchError>;
    /// Full body.
    fn download(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// libcurl-backed [`Fetcher`] with fixed per-request timeouts.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    pub probe_timeout: Duration,
    pub download_timeout: Duration,
}

impl CurlFetcher {
    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            probe_timeout: cfg.probe_timeout(),
            download_timeout: cfg.download_timeout(),
        }
    }
}

impl Fetcher for CurlFetcher {
    fn probe(&self, url: &str) -> Result<ProbeResult, FetchError> {
        probe::probe(url, self.probe_timeout)
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        download::download(url, self.download_timeout)
    }
}

/// Why the operator skipped a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineReason {
    NotAnImage,
    TooLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Probe or download failed at the transport/HTTP level.
    Connection,
    /// Anything else (disk, ledger, console).
    Other,
}

/// What happened to one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlOutcome {
    Saved {
        filename: String,
        path: PathBuf,
        fingerprint: Fingerprint,
    },
    Duplicate {
        filename: String,
        fingerprint: Fingerprint,
    },
    Declined(DeclineReason),
    Failed {
        kind: FailureKind,
        message: String,
    },
}

impl UrlOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, UrlOutcome::Saved { .. })
    }

    /// Operator-facing result lines.
    fn report_lines(&self) -> Vec<String> {
        match self {
            UrlOutcome::Saved { filename, path, .. } => vec![
                format!("✓ Successfully fetched: {}", filename),
                format!("✓ Image saved to {}", path.display()),
            ],
            UrlOutcome::Duplicate { filename, .. } => {
                vec![format!("⏭️  Skipping duplicate image: {}", filename)]
            }
            UrlOutcome::Declined(_) => vec!["Skipping this URL.".to_string()],
            UrlOutcome::Failed {
                kind: FailureKind::Connection,
                message,
            } => vec![format!("✗ Connection error: {}", message)],
            UrlOutcome::Failed {
                kind: FailureKind::Other,
                message,
            } => vec![format!("✗ An error occurred: {}", message)],
        }
    }
}

/// Per-URL outcomes of one run, in input order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<(String, UrlOutcome)>,
}

impl RunSummary {
    pub fn successful(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_saved()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Downloaded {} of {} images",
            self.successful(),
            self.total()
        )
    }
}

/// Where and how images are stored.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub output_dir: PathBuf,
    pub ledger: Ledger,
    pub size_warning_bytes: u64,
    pub on_collision: CollisionPolicy,
}

impl PipelineSettings {
    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            output_dir: cfg.output_dir.clone(),
            ledger: Ledger::at(cfg.output_dir.join(&cfg.ledger_file)),
            size_warning_bytes: cfg.size_warning_bytes,
            on_collision: cfg.on_collision,
        }
    }

    /// Defaults with everything under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::from_config(&FetchConfig::default().with_output_dir(Some(dir)))
    }
}

/// Failure inside one URL's processing, split by kind.
enum StepError {
    Fetch(FetchError),
    Other(anyhow::Error),
}

impl From<FetchError> for StepError {
    fn from(e: FetchError) -> Self {
        StepError::Fetch(e)
    }
}

impl From<anyhow::Error> for StepError {
    fn from(e: anyhow::Error) -> Self {
        StepError::Other(e)
    }
}

pub struct Pipeline<'c, F> {
    fetcher: F,
    console: &'c mut dyn Console,
    settings: PipelineSettings,
}

impl<'c, F: Fetcher> Pipeline<'c, F> {
    pub fn new(fetcher: F, console: &'c mut dyn Console, settings: PipelineSettings) -> Self {
        Self {
            fetcher,
            console,
            settings,
        }
    }

    /// Process every URL in order and print the summary. Never fails as a whole.
    pub fn run(&mut self, urls: &[String]) -> RunSummary {
        let mut summary = RunSummary::default();
        for url in urls {
            let outcome = self.process_url(url);
            for line in outcome.report_lines() {
                self.say(&line);
            }
            summary.outcomes.push((url.clone(), outcome));
        }
        self.say("");
        self.say(&summary.to_string());
        tracing::info!(
            successful = summary.successful(),
            total = summary.total(),
            "run finished"
        );
        summary
    }

    /// Run one URL to its outcome. Errors are folded into [`UrlOutcome::Failed`].
    pub fn process_url(&mut self, url: &str) -> UrlOutcome {
        let outcome = match self.try_process_url(url) {
            Ok(outcome) => outcome,
            Err(StepError::Fetch(e)) => {
                tracing::debug!(
                    url,
                    timeout = e.is_timeout(),
                    status = ?e.status(),
                    "request failed"
                );
                UrlOutcome::Failed {
                    kind: FailureKind::Connection,
                    message: e.to_string(),
                }
            }
            Err(StepError::Other(e)) => UrlOutcome::Failed {
                kind: FailureKind::Other,
                message: format!("{:#}", e),
            },
        };
        match &outcome {
            UrlOutcome::Failed { kind, message } => {
                tracing::warn!(url, ?kind, %message, "fetch failed")
            }
            other => tracing::debug!(url, outcome = ?other, "url processed"),
        }
        outcome
    }

    fn try_process_url(&mut self, url: &str) -> Result<UrlOutcome, StepError> {
        self.console.say("")?;
        self.console.say(&format!("Attempting to fetch: {}", url))?;

        let head = self.fetcher.probe(url)?;

        if !head.is_image() {
            self.console.say(&format!(
                "⚠️  Warning: URL doesn't appear to be an image (Content-Type: {})",
                head.content_type_display()
            ))?;
            if !confirm(&mut *self.console, "Do you want to continue anyway?")? {
                return Ok(UrlOutcome::Declined(DeclineReason::NotAnImage));
            }
        }

        if let Some(len) = head.content_length {
            if len > self.settings.size_warning_bytes {
                self.console.say(&format!(
                    "⚠️  Warning: Image is large ({:.2} MB)",
                    len as f64 / 1024.0 / 1024.0
                ))?;
                if !confirm(&mut *self.console, "Do you want to continue?")? {
                    return Ok(UrlOutcome::Declined(DeclineReason::TooLarge));
                }
            }
        }

        let body = self.fetcher.download(url)?;

        let filename = url_model::derive_filename(url, head.content_type.as_deref());
        let fingerprint = Fingerprint::of(&body);

        if self.settings.ledger.contains(&fingerprint)? {
            return Ok(UrlOutcome::Duplicate {
                filename,
                fingerprint,
            });
        }

        let dir = &self.settings.output_dir;
        let ledger = &self.settings.ledger;
        let ledger_name = ledger.path().file_name().and_then(|n| n.to_str()).unwrap_or("");
        let filename =
            storage::resolve_filename(dir, &filename, self.settings.on_collision, ledger_name)?;
        let replaced = dir.join(&filename).exists();
        let path = storage::store(dir, &filename, &body)?;
        if let Err(e) = ledger.append(&LedgerEntry::new(&fingerprint, &filename)) {
            if replaced {
                tracing::warn!(path = %path.display(), "stored file has no ledger entry");
            } else if let Err(rm) = std::fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), "remove unrecorded file: {}", rm);
            }
            return Err(e.into());
        }

        Ok(UrlOutcome::Saved {
            filename,
            path,
            fingerprint,
        })
    }

    /// Console writes outside a URL's processing; failures are only logged.
    fn say(&mut self, line: &str) {
        if let Err(e) = self.console.say(line) {
            tracing::warn!("console write failed: {:#}", e);
        }
    }
}
