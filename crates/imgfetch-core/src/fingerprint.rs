//! Content fingerprints: 128-bit MD5 over the downloaded bytes.
//!
//! The fingerprint is the dedup key stored in the ledger as lowercase hex.

use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

const BUF_SIZE: usize = 64 * 1024;

/// MD5 digest of a full image body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Fingerprint of an in-memory body.
    pub fn of(bytes: &[u8]) -> Self {
        Fingerprint(md5::compute(bytes).0)
    }

    /// Lowercase hex form, as written to the ledger.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut out = [0u8; 16];
        hex::decode_to_slice(s.trim(), &mut out)
            .with_context(|| format!("invalid fingerprint {:?}", s))?;
        Ok(Fingerprint(out))
    }
}

/// Compute the fingerprint of a file on disk, reading in chunks.
pub fn fingerprint_path(path: &Path) -> Result<Fingerprint> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut ctx = md5::Context::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        ctx.consume(&buf[..n]);
    }
    Ok(Fingerprint(ctx.compute().0))
}
