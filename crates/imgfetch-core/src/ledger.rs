//! Append-only fingerprint ledger.
//!
//! One line per stored image: `<hex-fingerprint>|<filename>\n`. The file only
//! ever grows; it is never truncated, rewritten or compacted.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::fingerprint::{fingerprint_path, Fingerprint};

/// Ledger file name inside the output directory.
pub const DEFAULT_LEDGER_FILE: &str = "downloaded_hashes.txt";

/// One ledger line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Hex fingerprint as written. Kept as text so foreign or malformed lines
    /// still dedup by string.
    pub fingerprint: String,
    /// Filename inside the output directory; empty if the line had no `|`.
    pub filename: String,
}

impl LedgerEntry {
    pub fn new(fingerprint: &Fingerprint, filename: &str) -> Self {
        Self {
            fingerprint: fingerprint.to_hex(),
            filename: filename.to_string(),
        }
    }

    /// Parse one line, splitting on the first `|`. Blank lines yield `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
        if line.trim().is_empty() {
            return None;
        }
        let (fp, name) = line.split_once('|').unwrap_or((line, ""));
        Some(Self {
            fingerprint: fp.trim().to_string(),
            filename: name.to_string(),
        })
    }

    fn to_line(&self) -> String {
        format!("{}|{}\n", self.fingerprint, self.filename)
    }
}

/// Handle to a ledger file. Holds only the path; every call re-reads or appends.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Ledger at `<dir>/downloaded_hashes.txt`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::at(dir.join(DEFAULT_LEDGER_FILE))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory stored filenames are relative to.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// All entries in file order. A missing ledger is empty.
    pub fn entries(&self) -> Result<Vec<LedgerEntry>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("read ledger {}", self.path.display()))
            }
        };
        Ok(data.lines().filter_map(LedgerEntry::parse_line).collect())
    }

    /// True if `fingerprint` was already recorded.
    pub fn contains(&self, fingerprint: &Fingerprint) -> Result<bool> {
        let hex = fingerprint.to_hex();
        Ok(self.entries()?.iter().any(|e| e.fingerprint == hex))
    }

    /// Append one entry, creating the file if needed.
    pub fn append(&self, entry: &LedgerEntry) -> Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open ledger {}", self.path.display()))?;
        f.write_all(entry.to_line().as_bytes())
            .with_context(|| format!("append to ledger {}", self.path.display()))?;
        tracing::debug!(
            fingerprint = %entry.fingerprint,
            filename = %entry.filename,
            "ledger entry appended"
        );
        Ok(())
    }

    /// Check every entry against the file it names.
    pub fn verify(&self) -> Result<VerifyReport> {
        let mut report = VerifyReport::default();
        for entry in self.entries()? {
            let path = self.dir().join(&entry.filename);
            if entry.filename.is_empty() || !path.is_file() {
                report.missing.push(entry);
                continue;
            }
            let actual = fingerprint_path(&path)?;
            if actual.to_hex() == entry.fingerprint {
                report.ok.push(entry);
            } else {
                report.mismatched.push((entry, actual));
            }
        }
        Ok(report)
    }
}

/// Outcome of [`Ledger::verify`].
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub ok: Vec<LedgerEntry>,
    /// Entries whose file is gone (or that name no file).
    pub missing: Vec<LedgerEntry>,
    /// Entries whose file now hashes differently; carries the actual fingerprint.
    pub mismatched: Vec<(LedgerEntry, Fingerprint)>,
}

impl VerifyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty()
    }
}
