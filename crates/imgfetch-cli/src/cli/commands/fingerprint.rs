//! Fingerprint command: content hash of a file, as the ledger records it.

use anyhow::Result;
use imgfetch_core::fingerprint;
use std::path::Path;

/// Compute and print the fingerprint of the given file.
pub fn run_fingerprint(path: &Path) -> Result<()> {
    let fp = fingerprint::fingerprint_path(path)?;
    println!("{}  {}", fp, path.display());
    Ok(())
}
