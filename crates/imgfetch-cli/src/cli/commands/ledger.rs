//! `imgfetch ledger` – list recorded fingerprints.

use anyhow::Result;
use imgfetch_core::config::FetchConfig;
use imgfetch_core::pipeline::PipelineSettings;

pub fn run_ledger(cfg: &FetchConfig) -> Result<()> {
    let ledger = PipelineSettings::from_config(cfg).ledger;
    let entries = ledger.entries()?;
    if entries.is_empty() {
        println!("No images recorded in {}", ledger.path().display());
        return Ok(());
    }
    for e in &entries {
        println!("{}  {}", e.fingerprint, e.filename);
    }
    println!("{} image(s) in {}", entries.len(), ledger.path().display());
    Ok(())
}
