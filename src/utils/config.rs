//! Application configuration constants.
//! Canvas, ceilings and default destinations in one place.

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Config file looked up in the data root (e.g. `.assetpack.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Defaults ----

/// Defaults used when neither the config file nor the CLI set a value.
pub struct Defaults;

impl Defaults {
    pub const CANVAS_WIDTH: u32 = 240;
    pub const CANVAS_HEIGHT: u32 = 135;
    /// Ceiling for all emitted animation frames combined (bytes).
    pub const GIF_MAX_ASSET_BYTES: usize = 700_000;
    pub const IR_MAX_FILES: usize = 120;
    pub const IR_MAX_COMMANDS: usize = 2500;
    pub const IR_MAX_SAMPLES: usize = 220_000;
    pub const TXT_MAX_CHARS: usize = 34;
    pub const DATA_DIR: &'static str = "data";
    pub const OUT_DIR: &'static str = ".";
    pub const EXPORT_DIR: &'static str = "tools/out/normalized_img";
    pub const IR_MANIFEST_NAME: &'static str = "ir.txt";
}

// ---- Capture records ----

/// Defaults for capture record fields that are absent or fail to parse.
pub struct CaptureDefaults;

impl CaptureDefaults {
    pub const KIND: &'static str = "parsed";
    pub const FREQUENCY: u32 = 38_000;
    pub const DUTY_CYCLE: f64 = 0.33;
    /// Timing samples are clamped into `0..=SAMPLE_MAX`.
    pub const SAMPLE_MAX: i64 = u16::MAX as i64;
    pub const EXTENSION: &'static str = "ir";
}

// ---- Source extensions ----

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];
pub const GIF_EXTENSIONS: &[&str] = &["gif"];
pub const TXT_EXTENSIONS: &[&str] = &["txt"];
pub const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

// ---- Animation timing ----

/// Delay assumed per source frame when a window's declared delays sum to zero or less.
pub const FALLBACK_FRAME_DELAY_MS: i64 = 100;

// ---- Hashing ----

/// Buffer sizes for digesting existing destinations.
pub struct HashingConsts;

impl HashingConsts {
    /// Chunk size for reading existing headers (bytes). 1 MB.
    pub const HASH_READ_CHUNK_SIZE: usize = 1024 * 1024;
}

// ---- Output destinations ----

/// Header destinations per pipeline, relative to the output root unless absolute.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct OutputLayout {
    pub img: Vec<PathBuf>,
    pub gif: Vec<PathBuf>,
    pub txt: Vec<PathBuf>,
    pub ir: Vec<PathBuf>,
    #[serde(rename = "portalhtml")]
    pub portal: Vec<PathBuf>,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            img: vec![
                PathBuf::from("idk-img/include/generated/img_assets.h"),
                PathBuf::from("idk-cyd/include/generated/cyd_img_assets.h"),
            ],
            gif: vec![
                PathBuf::from("idk-gif/include/generated/gif_asset.h"),
                PathBuf::from("idk-cyd/include/generated/cyd_gif_asset.h"),
            ],
            txt: vec![PathBuf::from("idk-txt/include/generated/txt_asset.h")],
            ir: vec![PathBuf::from("idk-ir/include/generated/ir_assets.h")],
            portal: vec![PathBuf::from(
                "idk-portal/include/generated/portal_pages.h",
            )],
        }
    }
}
