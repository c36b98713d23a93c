//! Public and internal types for the assetpack API and pipelines.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::config::{Defaults, OutputLayout};

/// Fixed output raster dimensions shared by all image and animation output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: Defaults::CANVAS_WIDTH,
            height: Defaults::CANVAS_HEIGHT,
        }
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixel samples in one frame.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Encoded size of one frame at 2 bytes per sample.
    pub fn frame_bytes(&self) -> usize {
        self.area() * 2
    }
}

/// Policy for reconciling a source aspect ratio with the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Uniform scale to fit inside the canvas, centered on the background color.
    #[default]
    Contain,
    /// Uniform scale then center crop; fills the canvas, no borders.
    Cover,
    /// Non-uniform resize to the exact canvas size.
    Stretch,
}

/// Format used for the normalized image exports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Bmp,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Bmp => "bmp",
        }
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// Which pipelines to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Task {
    #[default]
    All,
    Img,
    Gif,
    Txt,
    Ir,
    #[value(name = "portalhtml")]
    PortalHtml,
}

impl Task {
    /// True if running `self` includes the pipeline selected by `other`.
    pub fn includes(&self, other: Task) -> bool {
        *self == Task::All || *self == other
    }
}

/// Everything the pixel path needs: canvas, fit, optional pre-rotation and the `contain` fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeOpts {
    pub canvas: Canvas,
    pub fit: FitMode,
    /// Rotate 90 degrees counter-clockwise before fitting.
    pub rotate_left: bool,
    pub background: [u8; 3],
}

impl Default for EncodeOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fit: FitMode::default(),
            rotate_left: false,
            background: [0, 0, 0],
        }
    }
}

/// Ceilings applied while ingesting capture files. Exceeding one truncates, never errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureBudget {
    pub max_files: usize,
    pub max_records: usize,
    pub max_samples: usize,
}

impl Default for CaptureBudget {
    fn default() -> Self {
        Self {
            max_files: Defaults::IR_MAX_FILES,
            max_records: Defaults::IR_MAX_COMMANDS,
            max_samples: Defaults::IR_MAX_SAMPLES,
        }
    }
}

/// Full options (CLI and lib). Built from defaults, then `.assetpack.toml`, then CLI flags.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Root holding `img/`, `gifs/`, `txt/`, `ir/` and `portal_html/`.
    pub data_dir: PathBuf,
    /// Root that relative output destinations and the export dir resolve against.
    pub out_dir: PathBuf,
    pub encode: EncodeOpts,
    pub export_format: ExportFormat,
    /// Where normalized images are saved. Relative paths resolve against `out_dir`.
    pub export_dir: PathBuf,
    /// Tree manifest ordering the capture files. When None, `<data_dir>/../ir.txt`.
    pub manifest: Option<PathBuf>,
    /// Byte ceiling for all emitted animation frames combined.
    pub gif_max_bytes: usize,
    pub capture_budget: CaptureBudget,
    /// Column budget for text wrapping.
    pub txt_max_chars: usize,
    pub outputs: OutputLayout,
    pub verbose: bool,
    /// Compile everything but write nothing.
    pub dry_run: bool,
    /// Print the run summary as JSON.
    pub json: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Defaults::DATA_DIR),
            out_dir: PathBuf::from(Defaults::OUT_DIR),
            encode: EncodeOpts::default(),
            export_format: ExportFormat::default(),
            export_dir: PathBuf::from(Defaults::EXPORT_DIR),
            manifest: None,
            gif_max_bytes: Defaults::GIF_MAX_ASSET_BYTES,
            capture_budget: CaptureBudget::default(),
            txt_max_chars: Defaults::TXT_MAX_CHARS,
            outputs: OutputLayout::default(),
            verbose: false,
            dry_run: false,
            json: false,
        }
    }
}

impl Opts {
    pub fn img_dir(&self) -> PathBuf {
        self.data_dir.join("img")
    }

    pub fn gif_dir(&self) -> PathBuf {
        self.data_dir.join("gifs")
    }

    pub fn txt_dir(&self) -> PathBuf {
        self.data_dir.join("txt")
    }

    pub fn ir_dir(&self) -> PathBuf {
        self.data_dir.join("ir")
    }

    pub fn portal_dir(&self) -> PathBuf {
        self.data_dir.join("portal_html")
    }

    /// Manifest path: explicit, or `ir.txt` next to the data root.
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest.clone().unwrap_or_else(|| {
            self.data_dir
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(std::path::Path::new("."))
                .join(Defaults::IR_MANIFEST_NAME)
        })
    }

    /// Export dir resolved against `out_dir` when relative.
    pub fn resolved_export_dir(&self) -> PathBuf {
        if self.export_dir.is_absolute() {
            self.export_dir.clone()
        } else {
            self.out_dir.join(&self.export_dir)
        }
    }
}

/// Counts reported after a run. `None` means the task was not run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Summary {
    pub images: Option<usize>,
    pub export_dir: Option<PathBuf>,
    pub gif_frames: Option<usize>,
    pub txt_lines: Option<usize>,
    pub ir_files: Option<usize>,
    pub ir_commands: Option<usize>,
    pub portal_pages: Option<usize>,
    /// Destinations whose content changed (or would change, in dry-run).
    pub written: Vec<PathBuf>,
    /// Destinations already up to date.
    pub unchanged: Vec<PathBuf>,
}

// ---- Output tables ----

/// Terminal artifact of every pipeline: ordered named entries plus a count. Empty is valid.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputTable<T> {
    pub entries: Vec<T>,
}

impl<T> Default for OutputTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> OutputTable<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }
}

/// One still image fitted to the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageAsset {
    /// Source file name, e.g. `logo.png`.
    pub name: String,
    /// Sanitized, table-unique identifier used for the payload array.
    pub ident: String,
    pub width: u32,
    pub height: u32,
    /// Big-endian RGB565, `width * height * 2` bytes.
    pub rgb565: Vec<u8>,
}

/// One kept animation frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GifFrame {
    pub rgb565: Vec<u8>,
    pub delay_ms: u32,
}

/// One animated asset after frame-budget subsampling.
#[derive(Clone, Debug, PartialEq)]
pub struct GifAsset {
    pub name: String,
    pub frames: Vec<GifFrame>,
}

impl GifAsset {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// One parsed remote-control command.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandRecord {
    pub name: String,
    /// Free-form kind tag, lowercased (e.g. `parsed`, `raw`).
    pub kind: String,
    pub protocol: String,
    pub address: u32,
    pub command: u32,
    pub frequency: u32,
    pub duty_cycle: f64,
    /// Timing samples; empty unless a `data` line was supplied.
    pub raw_data: Vec<u16>,
}

impl CommandRecord {
    pub fn named(name: impl Into<String>) -> Self {
        use crate::utils::config::CaptureDefaults;
        Self {
            name: name.into(),
            kind: CaptureDefaults::KIND.to_string(),
            protocol: String::new(),
            address: 0,
            command: 0,
            frequency: CaptureDefaults::FREQUENCY,
            duty_cycle: CaptureDefaults::DUTY_CYCLE,
            raw_data: Vec::new(),
        }
    }
}

/// Records parsed from one capture document.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandFile {
    /// Path relative to the capture root, `/`-separated.
    pub name: String,
    pub commands: Vec<CommandRecord>,
}

impl CommandFile {
    pub fn sample_count(&self) -> usize {
        self.commands.iter().map(|c| c.raw_data.len()).sum()
    }
}

/// Wrapped lines of the first text document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextTable {
    /// Source file name; None when no document was found.
    pub source: Option<String>,
    pub lines: Vec<String>,
}

impl TextTable {
    pub fn count(&self) -> usize {
        self.lines.len()
    }
}

/// One HTML template embedded verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalPage {
    pub name: String,
    pub ident: String,
    pub html: String,
}
