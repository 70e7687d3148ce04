//! Disk I/O for stored images.
//!
//! Bodies are written to `<name>.part`, synced, then renamed onto the final
//! name so a crash never leaves a half-written image under a ledger name.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::CollisionPolicy;
use crate::url_model::{fit_with_tail, split_extension, NAME_MAX};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Give up looking for a free `_N` name after this many tries.
const MAX_SUFFIX: u32 = 10_000;

/// Path for the temp file: appends `.part` to the final path (e.g. `a.png` → `a.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))
}

/// Pick the filename to store under in `dir`.
///
/// With [`CollisionPolicy::Overwrite`] an existing file of the same name is
/// replaced. With [`CollisionPolicy::Suffix`], if `filename` is taken the first
/// free `stem_N.ext` (N = 1, 2, ...) is returned. Under both policies `reserved`
/// (the ledger's file name) and names ending in `.part` are never returned as
/// is; they get a `_N` suffix too. Suffixed names are kept within
/// [`NAME_MAX`] by shortening the stem.
pub fn resolve_filename(
    dir: &Path,
    filename: &str,
    policy: CollisionPolicy,
    reserved: &str,
) -> Result<String> {
    let acceptable = |name: &str| {
        name != reserved
            && !name.ends_with(TEMP_SUFFIX)
            && (policy == CollisionPolicy::Overwrite || !dir.join(name).exists())
    };
    if acceptable(filename) {
        return Ok(filename.to_string());
    }
    let (stem, ext) = if filename.ends_with(TEMP_SUFFIX) {
        (filename, "")
    } else {
        split_extension(filename)
    };
    for n in 1..=MAX_SUFFIX {
        let candidate = fit_with_tail(stem, &format!("_{}{}", n, ext), NAME_MAX);
        if acceptable(&candidate) {
            return Ok(candidate);
        }
    }
    anyhow::bail!(
        "no free filename for {} in {} after {} attempts",
        filename,
        dir.display(),
        MAX_SUFFIX
    )
}

/// Write `bytes` to `dir/filename`, replacing any existing file. Returns the final path.
///
/// On failure the `.part` file is removed and any previous file is left alone.
pub fn store(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let final_path = dir.join(filename);
    let tp = temp_path(&final_path);

    let written = write_synced(&tp, bytes).and_then(|()| {
        fs::rename(&tp, &final_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                tp.display(),
                final_path.display()
            )
        })
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tp);
        return Err(e);
    }
    Ok(final_path)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to create temp file: {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("write {}", path.display()))?;
    file.sync_all().context("storage sync failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEDGER: &str = "downloaded_hashes.txt";

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("photo.jpg"));
        assert_eq!(p.to_string_lossy(), "photo.jpg.part");
        let p2 = temp_path(Path::new("/tmp/pic.png"));
        assert_eq!(p2.to_string_lossy(), "/tmp/pic.png.part");
    }

    #[test]
    fn ensure_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn store_writes_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = store(dir.path(), "pic.png", b"first").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first");
        store(dir.path(), "pic.png", b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn resolve_filename_free_name_untouched() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_filename(dir.path(), "photo.jpg", CollisionPolicy::Suffix, LEDGER).unwrap(),
            "photo.jpg"
        );
    }

    #[test]
    fn resolve_filename_suffixes_taken_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("photo.jpg"), b"x").unwrap();
        fs::write(dir.path().join("photo_1.jpg"), b"x").unwrap();
        assert_eq!(
            resolve_filename(dir.path(), "photo.jpg", CollisionPolicy::Suffix, LEDGER).unwrap(),
            "photo_2.jpg"
        );
        assert_eq!(
            resolve_filename(dir.path(), "photo.jpg", CollisionPolicy::Overwrite, LEDGER).unwrap(),
            "photo.jpg"
        );
    }

    #[test]
    fn resolve_filename_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blob"), b"x").unwrap();
        assert_eq!(
            resolve_filename(dir.path(), "blob", CollisionPolicy::Suffix, LEDGER).unwrap(),
            "blob_1"
        );
    }

    #[test]
    fn resolve_filename_never_returns_ledger_name() {
        let dir = tempfile::tempdir().unwrap();
        for policy in [CollisionPolicy::Suffix, CollisionPolicy::Overwrite] {
            assert_eq!(
                resolve_filename(dir.path(), LEDGER, policy, LEDGER).unwrap(),
                "downloaded_hashes_1.txt"
            );
        }
    }

    #[test]
    fn resolve_filename_never_returns_temp_names() {
        let dir = tempfile::tempdir().unwrap();
        for policy in [CollisionPolicy::Suffix, CollisionPolicy::Overwrite] {
            let name = resolve_filename(dir.path(), "a.png.part", policy, LEDGER).unwrap();
            assert_eq!(name, "a.png.part_1");
        }
    }

    #[test]
    fn resolve_filename_suffix_stays_within_name_max() {
        let dir = tempfile::tempdir().unwrap();
        let long = format!("{}.png", "a".repeat(NAME_MAX - 4));
        assert_eq!(long.len(), NAME_MAX);
        fs::write(dir.path().join(&long), b"x").unwrap();
        let name = resolve_filename(dir.path(), &long, CollisionPolicy::Suffix, LEDGER).unwrap();
        assert!(name.len() <= NAME_MAX);
        assert!(name.ends_with("a_1.png"));
    }

    #[test]
    fn store_failure_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail.
        fs::create_dir(dir.path().join("pic.png")).unwrap();
        assert!(store(dir.path(), "pic.png", b"bytes").is_err());
        assert!(!dir.path().join("pic.png.part").exists());
        assert!(dir.path().join("pic.png").is_dir());
    }
}
