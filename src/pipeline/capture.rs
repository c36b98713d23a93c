//! Infrared capture files (`.ir`): line-oriented `Key: value` records, ingested in manifest
//! order under ceilings on file count, record count and raw sample count.
//!
//! ```text
//! Filetype: IR signals file
//! Version: 1
//! #
//! name: Power
//! type: parsed
//! protocol: NEC
//! address: 07 00 00 00
//! command: 02 00 00 00
//! ```

use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::engine::tools::{
    path_relative_to, path_to_display_string, read_text_lossy, scan_files_recursive, split_lines,
};
use crate::pipeline::manifest::parse_tree_manifest;
use crate::types::{CaptureBudget, CommandFile, CommandRecord, OutputTable};
use crate::utils::config::CaptureDefaults;

/// Lines starting with these are file headers, not record fields.
const HEADER_MARKERS: &[&str] = &["Filetype:", "Version:"];

/// Whitespace-separated hex bytes, first token in the lowest byte: `"00 A1"` is `0xA100`.
/// Only four tokens fit in 32 bits; later ones are dropped. A token that is not hex
/// contributes 0 but still occupies its byte position.
pub fn parse_hex_bytes(value: &str) -> u32 {
    value
        .split_whitespace()
        .take(4)
        .enumerate()
        .fold(0u32, |acc, (i, token)| acc | (hex_byte(token) << (8 * i)))
}

/// Low byte of a hex token (`A1`, `0xA1`, `1A1` all give `0xA1`).
fn hex_byte(token: &str) -> u32 {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return 0;
    }
    let low = &digits[digits.len().saturating_sub(2)..];
    u32::from_str_radix(low, 16).unwrap_or(0)
}

/// Frequency in Hz. Accepts decimals (truncated); anything unparsable gives the default.
pub fn parse_frequency(value: &str) -> u32 {
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| (f as i64).clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(CaptureDefaults::FREQUENCY)
}

pub fn parse_duty_cycle(value: &str) -> f64 {
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .unwrap_or(CaptureDefaults::DUTY_CYCLE)
}

/// Raw timing samples clamped into `0..=65535`. Non-integer tokens are skipped.
pub fn parse_samples(value: &str) -> Vec<u16> {
    value.split_whitespace().filter_map(parse_sample).collect()
}

fn parse_sample(token: &str) -> Option<u16> {
    match token.parse::<i64>() {
        Ok(n) => Some(n.clamp(0, CaptureDefaults::SAMPLE_MAX) as u16),
        // Integer too large for i64: clamps like any other out-of-range value.
        Err(_) if is_integer_shaped(token) => Some(if token.starts_with('-') {
            0
        } else {
            u16::MAX
        }),
        Err(_) => None,
    }
}

fn is_integer_shaped(token: &str) -> bool {
    let digits = token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn flush(cur: &mut Option<CommandRecord>, out: &mut Vec<CommandRecord>) {
    if let Some(rec) = cur.take()
        && !rec.name.is_empty()
    {
        out.push(rec);
    }
}

/// Parse one capture document into records. Fields before the first `name` line are ignored;
/// records with an empty name are dropped.
pub fn parse_capture(text: &str) -> Vec<CommandRecord> {
    let mut out = Vec::new();
    let mut cur: Option<CommandRecord> = None;

    for raw in split_lines(text) {
        let line = raw.trim();
        if line.is_empty()
            || line.starts_with('#')
            || HEADER_MARKERS.iter().any(|m| line.starts_with(m))
        {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();

        if key == "name" {
            flush(&mut cur, &mut out);
            cur = Some(CommandRecord::named(value));
            continue;
        }
        let Some(rec) = cur.as_mut() else {
            continue;
        };
        match key.as_str() {
            "type" => rec.kind = value.to_lowercase(),
            "protocol" => rec.protocol = value.to_string(),
            "address" => rec.address = parse_hex_bytes(value),
            "command" => rec.command = parse_hex_bytes(value),
            "frequency" => rec.frequency = parse_frequency(value),
            "duty_cycle" => rec.duty_cycle = parse_duty_cycle(value),
            "data" => rec.raw_data = parse_samples(value),
            _ => {}
        }
    }
    flush(&mut cur, &mut out);
    out
}

/// Parse the capture file at `path`, naming it by its path relative to `root`.
pub fn parse_capture_file(path: &Path, root: &Path) -> Result<CommandFile> {
    let text = read_text_lossy(path)?;
    let rel = path_relative_to(path, root).unwrap_or_else(|| path.to_path_buf());
    Ok(CommandFile {
        name: path_to_display_string(&rel),
        commands: parse_capture(&text),
    })
}

/// Capture files in ingestion order: the manifest when it names any existing file,
/// otherwise every `.ir` under `root` in lexical order.
pub fn discover_capture_files(root: &Path, manifest: &Path) -> Vec<PathBuf> {
    let ordered = parse_tree_manifest(manifest, root);
    if !ordered.is_empty() {
        debug!(
            "{} capture files ordered by {}",
            ordered.len(),
            manifest.display()
        );
        return ordered;
    }
    scan_files_recursive(root, &[CaptureDefaults::EXTENSION])
}

/// Accept files in order until a ceiling would be exceeded. Files without records are skipped
/// and do not count. Once the record or sample ceiling would be crossed, ingestion stops;
/// later, smaller files are not considered.
pub fn select_within_budget<I>(files: I, budget: &CaptureBudget) -> Vec<CommandFile>
where
    I: IntoIterator<Item = CommandFile>,
{
    let mut accepted: Vec<CommandFile> = Vec::new();
    let mut records = 0_usize;
    let mut samples = 0_usize;
    for file in files {
        if accepted.len() >= budget.max_files {
            debug!("capture file ceiling reached ({})", budget.max_files);
            break;
        }
        if file.commands.is_empty() {
            continue;
        }
        let next_records = file.commands.len();
        let next_samples = file.sample_count();
        if records + next_records > budget.max_records {
            debug!(
                "capture record ceiling reached at {} ({} + {} > {})",
                file.name, records, next_records, budget.max_records
            );
            break;
        }
        if samples + next_samples > budget.max_samples {
            debug!(
                "capture sample ceiling reached at {} ({} + {} > {})",
                file.name, samples, next_samples, budget.max_samples
            );
            break;
        }
        records += next_records;
        samples += next_samples;
        accepted.push(file);
    }
    accepted
}

/// Compile the capture tree at `src_dir`. Files are parsed lazily so ingestion stops reading
/// as soon as a ceiling is hit.
pub fn compile_captures(
    src_dir: &Path,
    manifest: &Path,
    budget: &CaptureBudget,
) -> Result<OutputTable<CommandFile>> {
    if !src_dir.is_dir() {
        return Ok(OutputTable::default());
    }
    let root = src_dir
        .canonicalize()
        .with_context(|| format!("canonicalize {}", src_dir.display()))?;
    let files = discover_capture_files(&root, manifest);
    let parsed = files
        .iter()
        .filter_map(|path| match parse_capture_file(path, &root) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("Skipping capture {}: {:#}", path.display(), e);
                None
            }
        });
    Ok(OutputTable::new(select_within_budget(parsed, budget)))
}
