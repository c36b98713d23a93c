use clap::Parser;
use std::path::PathBuf;

use crate::types::{ExportFormat, FitMode, Task};
use crate::utils::config::Defaults;

/// Compile device assets into self-contained C++ headers.
#[derive(Clone, Parser)]
#[command(name = "assetpack")]
#[command(about = "Compile the asset data tree into generated headers; use --dry-run to preview.")]
pub struct Cli {
    /// Which pipeline to run. Default: all.
    #[arg(value_enum, value_name = "TASK", default_value_t = Task::All)]
    pub task: Task,

    /// Data root holding img/, gifs/, txt/, ir/ and portal_html/.
    #[arg(long, value_name = "DIR", default_value = Defaults::DATA_DIR)]
    pub data: PathBuf,

    /// Output root that header destinations resolve against.
    #[arg(long, value_name = "DIR", default_value = Defaults::OUT_DIR)]
    pub out: PathBuf,

    /// How images are fitted to the canvas. Default: contain (or the config file value).
    #[arg(long, value_enum)]
    pub fit: Option<FitMode>,

    /// Rotate sources 90 degrees counter-clockwise before fitting.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub rotate_left: Option<bool>,

    /// Background for `contain` borders, as R,G,B.
    #[arg(long, value_name = "R,G,B")]
    pub bg: Option<String>,

    /// Format of the normalized image exports.
    #[arg(long, value_enum)]
    pub export_format: Option<ExportFormat>,

    /// Where normalized images are saved. Relative paths resolve against --out.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Tree manifest ordering the capture files. Default: ir.txt next to the data root.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Compile everything and report what would change; write nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
