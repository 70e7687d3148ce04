use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Declared sizes above this many bytes need operator confirmation.
pub const DEFAULT_SIZE_WARNING_BYTES: u64 = 10 * 1024 * 1024;

/// What to do when a new (non-duplicate) image would land on an existing filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Append `_1`, `_2`, ... before the extension until the name is free.
    #[default]
    Suffix,
    /// Replace the existing file.
    Overwrite,
}

/// Global configuration loaded from `~/.config/imgfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Directory images and the ledger are stored in (relative to the working dir unless absolute).
    pub output_dir: PathBuf,
    /// Ledger file name inside `output_dir`.
    pub ledger_file: String,
    /// Timeout for the HEAD probe, in seconds.
    pub probe_timeout_secs: u64,
    /// Timeout for the full GET, in seconds.
    pub download_timeout_secs: u64,
    /// Declared Content-Length strictly above this triggers a confirmation prompt.
    pub size_warning_bytes: u64,
    /// Filename collision handling for new content.
    pub on_collision: CollisionPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("Fetched_Images"),
            ledger_file: crate::ledger::DEFAULT_LEDGER_FILE.to_string(),
            probe_timeout_secs: 10,
            download_timeout_secs: 30,
            size_warning_bytes: DEFAULT_SIZE_WARNING_BYTES,
            on_collision: CollisionPolicy::Suffix,
        }
    }
}

impl FetchConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    /// Same config with `output_dir` replaced, if an override is given.
    pub fn with_output_dir(mut self, dir: Option<&Path>) -> Self {
        if let Some(d) = dir {
            self.output_dir = d.to_path_buf();
        }
        self
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<FetchConfig> {
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
