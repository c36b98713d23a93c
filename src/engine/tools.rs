//! Path, listing and small parsing utilities

use anyhow::{Context, Result, bail};
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Path as a `/`-separated string so emitted names are identical on every host.
pub fn path_to_display_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Check if a file should be excluded based on OS-specific hidden files
pub fn is_os_hidden_file(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            // macOS
            ".DS_Store" | ".AppleDouble" | ".LSOverride" => true,
            // Windows
            "Thumbs.db" | "ehthumbs.db" | "Desktop.ini" => true,
            // Linux
            ".directory" => true,
            // macOS resource fork files start with ._
            _ => name.starts_with("._"),
        }
    } else {
        false
    }
}

/// Case-insensitive extension check. `exts` are given without the dot.
pub fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| exts.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

/// Files directly inside `dir` with one of `exts`, sorted. A missing dir yields an empty list.
pub fn list_files(dir: &Path, exts: &[&str]) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))? {
        let path = entry
            .with_context(|| format!("read entry in {}", dir.display()))?
            .path();
        if path.is_file() && has_extension(&path, exts) && !is_os_hidden_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Files anywhere under `dir` with one of `exts`, in lexical path order. Unreadable entries are skipped.
pub fn scan_files_recursive(dir: &Path, exts: &[&str]) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|r| match r {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable path during scan: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_extension(p, exts) && !is_os_hidden_file(p))
        .collect();
    files.sort();
    files
}

/// Read a text file, replacing invalid UTF-8 rather than failing.
pub fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Split on `\r\n`, `\r` or `\n`. A final terminator does not add an empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(i) => {
                lines.push(&rest[..i]);
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// File stem as a string (empty if missing).
pub fn file_stem_string(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name as a string (empty if missing).
pub fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse `"R,G,B"`; each component is clamped into `0..=255`.
pub fn parse_color(s: &str) -> Result<[u8; 3]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("bg color must be 'R,G,B', got '{}'", s);
    }
    let mut out = [0u8; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        let v: i64 = part
            .parse()
            .with_context(|| format!("bg color component '{}' is not an integer", part))?;
        *slot = v.clamp(0, 255) as u8;
    }
    Ok(out)
}
