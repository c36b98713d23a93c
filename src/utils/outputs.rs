//! Header destinations: resolve, skip when up to date, write via temp file + rename.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::hashing::{hash_bytes, hash_file};

/// What happened to one destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Content changed and was written (or would be, in dry-run).
    Written,
    /// Destination already held identical bytes; left untouched.
    Unchanged,
}

/// Resolve a destination against the output root unless it is absolute.
pub fn resolve_destination(out_dir: &Path, dest: &Path) -> PathBuf {
    if dest.is_absolute() {
        dest.to_path_buf()
    } else {
        out_dir.join(dest)
    }
}

/// Sibling temp path used while writing `dest`.
pub fn temp_path_for(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    dest.parent()
        .unwrap_or(Path::new("."))
        .join(format!(".{name}.tmp"))
}

/// True if `dest` exists and its blake3 digest equals that of `content`.
pub fn is_up_to_date(dest: &Path, content: &[u8]) -> Result<bool> {
    match hash_file(dest)? {
        Some(existing) => Ok(existing == hash_bytes(content)),
        None => Ok(false),
    }
}

/// Write `content` to `dest` unless it already holds the same bytes. Creates parent dirs.
/// With `dry_run`, reports what would happen without touching the filesystem.
pub fn write_output(dest: &Path, content: &str, dry_run: bool) -> Result<WriteOutcome> {
    if is_up_to_date(dest, content.as_bytes())? {
        debug!("{} is up to date", dest.display());
        return Ok(WriteOutcome::Unchanged);
    }
    if dry_run {
        debug!("dry-run: would write {}", dest.display());
        return Ok(WriteOutcome::Written);
    }
    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let temp_path = temp_path_for(dest);
    fs::write(&temp_path, content)
        .with_context(|| format!("write temp output {}", temp_path.display()))?;
    rename_temp_to_final(&temp_path, dest)?;
    debug!("wrote {} ({} bytes)", dest.display(), content.len());
    Ok(WriteOutcome::Written)
}

pub fn rename_temp_to_final(temp_path: &Path, final_path: &Path) -> Result<()> {
    fs::rename(temp_path, final_path).with_context(|| {
        format!(
            "rename temp output to final path ({} -> {})",
            temp_path.display(),
            final_path.display()
        )
    })
}
