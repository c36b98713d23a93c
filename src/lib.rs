//! Assetpack: compile display, animation, text, remote-control and portal assets into C++ headers

pub mod compile;
pub mod emit;
pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;

/// Result alias used by public assetpack API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: compile the assets selected by `task` with `opts` and write their headers.
///
/// Sources are read from the subdirectories of `opts.data_dir`; headers go to every destination
/// in `opts.outputs`, resolved against `opts.out_dir`. With `opts.dry_run` nothing is written
/// and the returned [`Summary`] lists what would change.
///
/// ```ignore
/// let opts = assetpack::Opts { data_dir: "data".into(), ..Default::default() };
/// let summary = assetpack::compile_dir(assetpack::Task::Img, &opts)?;
/// ```
pub fn compile_dir(task: Task, opts: &Opts) -> Result<Summary> {
    let config_str = format!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    debug!("{}", config_str);
    compile::compile_assets(task, opts)
}
