//! Plain text: greedy word wrap of the first document to a fixed column budget.

use anyhow::Result;
use log::debug;
use std::path::Path;

use crate::engine::tools::{file_name_string, list_files, read_text_lossy, split_lines};
use crate::types::TextTable;
use crate::utils::config::TXT_EXTENSIONS;

/// Wrap `content` so no line exceeds `max_chars` characters, except single words longer
/// than the budget, which are kept whole on their own line. Blank lines are preserved.
pub fn wrap_text_lines(content: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in split_lines(content) {
        let raw = raw.trim_end();
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut cur = String::new();
        for word in raw.split(' ') {
            let candidate = if cur.is_empty() {
                word.to_string()
            } else {
                format!("{cur} {word}")
            };
            if candidate.chars().count() <= max_chars {
                cur = candidate;
            } else {
                if !cur.is_empty() {
                    lines.push(std::mem::take(&mut cur));
                }
                cur = word.to_string();
            }
        }
        if !cur.is_empty() {
            lines.push(cur);
        }
    }
    lines
}

/// Wrap the first `.txt` in `src_dir` (sorted by name); any others are ignored.
pub fn compile_text(src_dir: &Path, max_chars: usize) -> Result<TextTable> {
    let files = list_files(src_dir, TXT_EXTENSIONS)?;
    let Some(first) = files.first() else {
        return Ok(TextTable::default());
    };
    if files.len() > 1 {
        debug!(
            "using {}, ignoring {} other text file(s)",
            first.display(),
            files.len() - 1
        );
    }
    let content = read_text_lossy(first)?;
    Ok(TextTable {
        source: Some(file_name_string(first)),
        lines: wrap_text_lines(&content, max_chars),
    })
}
