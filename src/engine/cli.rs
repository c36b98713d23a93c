//! CLI command handler: compile the selected task; --dry-run reports without writing.

use anyhow::Result;
use log::{debug, warn};

use crate::Opts;
use crate::compile::print_summary;
use crate::compile_dir;
use crate::engine::arg_parser::Cli;
use crate::engine::tools::parse_color;
use crate::utils::{PackagePaths, apply_file_to_opts, load_assetpack_toml, setup_logging};

/// Defaults, then `<data>/.assetpack.toml`, then CLI flags.
pub fn setup_opts(cli: &Cli) -> Result<Opts> {
    setup_logging(cli.verbose.unwrap_or(false));
    let mut opts = Opts {
        data_dir: cli.data.clone(),
        out_dir: cli.out.clone(),
        ..Default::default()
    };
    if let Some(file) = load_assetpack_toml(&cli.data) {
        debug!(
            "applying {}",
            cli.data.join(PackagePaths::get().config_filename()).display()
        );
        apply_file_to_opts(&file, &mut opts)?;
    }

    if let Some(fit) = cli.fit {
        opts.encode.fit = fit;
    }
    if let Some(rotate_left) = cli.rotate_left {
        opts.encode.rotate_left = rotate_left;
    }
    if let Some(ref bg) = cli.bg {
        opts.encode.background = parse_color(bg)?;
    }
    if let Some(format) = cli.export_format {
        opts.export_format = format;
    }
    if let Some(ref dir) = cli.export_dir {
        opts.export_dir = dir.clone();
    }
    if let Some(ref manifest) = cli.manifest {
        opts.manifest = Some(manifest.clone());
    }
    if let Some(verbose) = cli.verbose {
        opts.verbose = verbose;
    }
    opts.dry_run = cli.dry_run;
    opts.json = cli.json;
    Ok(opts)
}

/// Compile (default) or preview when --dry-run. Prints the run summary.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli)?;
    if opts.dry_run {
        warn!("RUNNING IN DRY-RUN MODE. NO HEADERS OR EXPORTS WILL BE WRITTEN.");
    }
    debug!("Compiling {:?} from {}...", cli.task, opts.data_dir.display());
    let summary = compile_dir(cli.task, &opts)?;
    print_summary(&summary, opts.json)?;
    Ok(())
}
