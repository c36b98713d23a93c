//! Ordering manifest for capture files: the text output of `tree`, e.g.
//!
//! ```text
//! .
//! ├── TVs
//! │   ├── Samsung
//! │   │   └── Samsung_TV.ir
//! │   └── LG.ir
//! └── Fans.ir
//! ```

use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::engine::tools::{has_extension, read_text_lossy, split_lines};
use crate::utils::config::CaptureDefaults;

const BRANCH: &str = "├──";
const LAST_BRANCH: &str = "└──";
const PIPE: char = '│';
const TAB_STOP: usize = 4;

/// Nesting depth of an indentation prefix: display columns (pipes count as one space,
/// tabs advance to the next 4-column stop) divided by 4.
pub fn indent_depth(prefix: &str) -> usize {
    let mut col = 0;
    for c in prefix.chars() {
        match c {
            '\t' => col += TAB_STOP - col % TAB_STOP,
            _ => col += 1,
        }
    }
    col / TAB_STOP
}

/// A tree line split into its indentation prefix and entry name.
#[derive(Debug, PartialEq, Eq)]
pub struct TreeLine<'a> {
    pub prefix: &'a str,
    pub name: &'a str,
}

/// Split `│   ├── name` into prefix and name. Lines without a connector (the root line,
/// blank lines, the `N directories, M files` footer) return None.
pub fn parse_tree_line(line: &str) -> Option<TreeLine<'_>> {
    let split = line
        .char_indices()
        .find(|(_, c)| *c != PIPE && *c != ' ')
        .map(|(i, _)| i)?;
    let (prefix, rest) = line.split_at(split);
    let rest = rest
        .strip_prefix(BRANCH)
        .or_else(|| rest.strip_prefix(LAST_BRANCH))?;
    let mut chars = rest.chars();
    if !chars.next()?.is_whitespace() {
        return None;
    }
    let name = chars.as_str().trim();
    if name.is_empty() {
        return None;
    }
    Some(TreeLine { prefix, name })
}

/// Resolve the manifest at `manifest` into existing capture files under `root`, in manifest order.
/// A missing or unreadable manifest yields an empty list.
pub fn parse_tree_manifest(manifest: &Path, root: &Path) -> Vec<PathBuf> {
    if !manifest.is_file() {
        return Vec::new();
    }
    let text = match read_text_lossy(manifest) {
        Ok(t) => t,
        Err(e) => {
            log::warn!("Ignoring manifest {}: {:#}", manifest.display(), e);
            return Vec::new();
        }
    };
    resolve_tree_entries(&text, root)
}

/// Walk tree `text`, tracking one directory segment per depth, and resolve leaf entries against `root`.
pub fn resolve_tree_entries(text: &str, root: &Path) -> Vec<PathBuf> {
    let ext = CaptureDefaults::EXTENSION;
    let leaf_suffix = format!(".{ext}");
    let mut stack: Vec<String> = Vec::new();
    let mut ordered = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for line in split_lines(text) {
        let Some(TreeLine { prefix, name }) = parse_tree_line(line) else {
            continue;
        };
        let depth = indent_depth(prefix);
        if stack.len() <= depth {
            stack.resize(depth + 1, String::new());
        }

        // Leaf by suffix alone; the on-disk check below still requires a real extension.
        if name.to_lowercase().ends_with(&leaf_suffix) {
            let mut rel = PathBuf::new();
            for segment in stack[..depth].iter().filter(|s| !s.is_empty()) {
                rel.push(segment);
            }
            rel.push(name);
            let Ok(full) = root.join(&rel).canonicalize() else {
                debug!("manifest entry not found: {}", rel.display());
                continue;
            };
            if full.is_file() && has_extension(&full, &[ext]) && seen.insert(full.clone()) {
                ordered.push(full);
            }
        } else {
            stack[depth] = name.to_string();
            stack.truncate(depth + 1);
        }
    }
    ordered
}
