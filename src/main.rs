//! Assetpack CLI: compile the data tree into generated headers; use --dry-run to preview.

use anyhow::Result;
use assetpack::engine::arg_parser::Cli;
use assetpack::engine::handle_run;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
