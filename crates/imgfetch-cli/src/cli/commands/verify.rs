//! `imgfetch verify` – check ledger entries against the files on disk.

use anyhow::Result;
use imgfetch_core::config::FetchConfig;
use imgfetch_core::pipeline::PipelineSettings;

pub fn run_verify(cfg: &FetchConfig) -> Result<()> {
    let ledger = PipelineSettings::from_config(cfg).ledger;
    let report = ledger.verify()?;

    for e in &report.missing {
        println!("missing     {}  {}", e.fingerprint, e.filename);
    }
    for (e, actual) in &report.mismatched {
        println!("mismatched  {}  {} (now {})", e.fingerprint, e.filename, actual);
    }
    println!(
        "{} ok, {} missing, {} mismatched",
        report.ok.len(),
        report.missing.len(),
        report.mismatched.len()
    );

    if !report.is_consistent() {
        anyhow::bail!("ledger {} does not match the stored files", ledger.path().display());
    }
    Ok(())
}
