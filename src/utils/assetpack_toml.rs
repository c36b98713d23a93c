//! Load `.assetpack.toml` from the data root. The CLI applies it before its own flags;
//! lib callers build [`Opts`](crate::Opts) directly or call [`apply_file_to_opts`] themselves.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::engine::tools::parse_color;
use crate::types::{ExportFormat, FitMode};
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct AssetpackToml {
    #[serde(default)]
    settings: SettingsSection,
    #[serde(default)]
    outputs: OutputsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    fit: Option<FitMode>,
    rotate_left: Option<bool>,
    bg: Option<String>,
    export_format: Option<ExportFormat>,
    export_dir: Option<PathBuf>,
    manifest: Option<PathBuf>,
    verbose: Option<bool>,
    canvas_width: Option<u32>,
    canvas_height: Option<u32>,
    gif_max_bytes: Option<usize>,
    ir_max_files: Option<usize>,
    ir_max_commands: Option<usize>,
    ir_max_samples: Option<usize>,
    txt_max_chars: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct OutputsSection {
    img: Option<Vec<PathBuf>>,
    gif: Option<Vec<PathBuf>>,
    txt: Option<Vec<PathBuf>>,
    ir: Option<Vec<PathBuf>>,
    portalhtml: Option<Vec<PathBuf>>,
}

/// Load the config file from `dir` if present. Returns None if missing or unparsable (warns on the latter).
pub fn load_assetpack_toml(dir: &Path) -> Option<AssetpackToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_assetpack_toml(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

pub fn parse_assetpack_toml(s: &str) -> Result<AssetpackToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $sec.$sec_field.clone() {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags,
/// after `opts.data_dir` is set.
/// A malformed `bg` is an error: silently falling back would change every emitted pixel.
pub fn apply_file_to_opts(file: &AssetpackToml, opts: &mut Opts) -> crate::Result<()> {
    let s = &file.settings;
    apply_file_opt!(s, opts, fit => encode.fit);
    apply_file_opt!(s, opts, rotate_left => encode.rotate_left);
    if let Some(ref bg) = s.bg {
        opts.encode.background = parse_color(bg)?;
    }
    apply_file_opt!(s, opts, export_format => export_format);
    apply_file_opt!(s, opts, export_dir => export_dir);
    // Relative to the data root holding the file, not the working directory.
    if let Some(ref m) = s.manifest {
        opts.manifest = Some(if m.is_absolute() {
            m.clone()
        } else {
            opts.data_dir.join(m)
        });
    }
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, canvas_width => encode.canvas.width);
    apply_file_opt!(s, opts, canvas_height => encode.canvas.height);
    apply_file_opt!(s, opts, gif_max_bytes => gif_max_bytes);
    apply_file_opt!(s, opts, ir_max_files => capture_budget.max_files);
    apply_file_opt!(s, opts, ir_max_commands => capture_budget.max_records);
    apply_file_opt!(s, opts, ir_max_samples => capture_budget.max_samples);
    apply_file_opt!(s, opts, txt_max_chars => txt_max_chars);

    let o = &file.outputs;
    apply_file_opt!(o, opts, img => outputs.img);
    apply_file_opt!(o, opts, gif => outputs.gif);
    apply_file_opt!(o, opts, txt => outputs.txt);
    apply_file_opt!(o, opts, ir => outputs.ir);
    apply_file_opt!(o, opts, portalhtml => outputs.portal);
    Ok(())
}
