//! Run the selected pipelines, render their headers and write every destination.

use anyhow::{Context, Result, bail};
use log::{debug, info};
use std::path::PathBuf;

use crate::emit::{
    render_gif_header, render_image_header, render_ir_header, render_portal_header,
    render_text_header,
};
use crate::pipeline::{
    ImageExport, compile_captures, compile_gifs, compile_images, compile_portal_pages,
    compile_text,
};
use crate::types::{Opts, Summary, Task};
use crate::utils::{Colors, WriteOutcome, resolve_destination, write_output};

/// Reject options no pipeline can work with.
pub fn validate_opts(opts: &Opts) -> Result<()> {
    let canvas = opts.encode.canvas;
    if canvas.width == 0 || canvas.height == 0 {
        bail!(
            "canvas must be non-zero (got {}x{})",
            canvas.width,
            canvas.height
        );
    }
    Ok(())
}

/// Write one rendered header to each destination, recording the outcome in `summary`.
fn emit_header(dests: &[PathBuf], content: &str, opts: &Opts, summary: &mut Summary) -> Result<()> {
    for dest in dests {
        let path = resolve_destination(&opts.out_dir, dest);
        match write_output(&path, content, opts.dry_run)
            .with_context(|| format!("write header {}", path.display()))?
        {
            WriteOutcome::Written => summary.written.push(path),
            WriteOutcome::Unchanged => summary.unchanged.push(path),
        }
    }
    Ok(())
}

/// Compile the assets selected by `task` under `opts.data_dir` and write their headers.
/// Missing source directories yield empty (but still emitted) tables.
pub fn compile_assets(task: Task, opts: &Opts) -> Result<Summary> {
    validate_opts(opts)?;
    let mut summary = Summary::default();

    if task.includes(Task::Img) {
        let export_dir = opts.resolved_export_dir();
        let export = ImageExport {
            dir: export_dir.clone(),
            format: opts.export_format,
        };
        let export = (!opts.dry_run).then_some(&export);
        let table = compile_images(&opts.img_dir(), &opts.encode, export, opts.verbose)?;
        emit_header(&opts.outputs.img, &render_image_header(&table), opts, &mut summary)?;
        summary.images = Some(table.count());
        summary.export_dir = export.map(|_| export_dir);
    }

    if task.includes(Task::Gif) {
        let table = compile_gifs(&opts.gif_dir(), &opts.encode, opts.gif_max_bytes, opts.verbose)?;
        let header = render_gif_header(&table, opts.encode.canvas);
        emit_header(&opts.outputs.gif, &header, opts, &mut summary)?;
        summary.gif_frames = Some(table.iter().map(|g| g.frame_count()).sum());
    }

    if task.includes(Task::Txt) {
        let table = compile_text(&opts.txt_dir(), opts.txt_max_chars)?;
        emit_header(&opts.outputs.txt, &render_text_header(&table), opts, &mut summary)?;
        summary.txt_lines = Some(table.count());
    }

    if task.includes(Task::Ir) {
        let manifest = opts.manifest_path();
        let table = compile_captures(&opts.ir_dir(), &manifest, &opts.capture_budget)?;
        emit_header(&opts.outputs.ir, &render_ir_header(&table), opts, &mut summary)?;
        summary.ir_files = Some(table.count());
        summary.ir_commands = Some(table.iter().map(|f| f.commands.len()).sum());
    }

    if task.includes(Task::PortalHtml) {
        let table = compile_portal_pages(&opts.portal_dir())?;
        emit_header(&opts.outputs.portal, &render_portal_header(&table), opts, &mut summary)?;
        summary.portal_pages = Some(table.count());
    }

    debug!(
        "{} header(s) written, {} unchanged",
        summary.written.len(),
        summary.unchanged.len()
    );
    Ok(summary)
}

fn count_line(label: &str, count: usize) -> String {
    format!(
        "- {}: {}",
        label,
        Colors::colorize(Colors::COUNT, &count.to_string())
    )
}

/// Human-readable summary lines, one per task that ran.
pub fn summary_lines(summary: &Summary) -> Vec<String> {
    let mut lines = vec!["Asset compilation done".to_string()];
    if let Some(n) = summary.images {
        lines.push(count_line("Images compiled", n));
    }
    if let Some(dir) = &summary.export_dir {
        lines.push(format!(
            "- Normalized image exports: {}",
            Colors::colorize(Colors::PATH, &dir.display().to_string())
        ));
    }
    if let Some(n) = summary.gif_frames {
        lines.push(count_line("GIF frames compiled", n));
    }
    if let Some(n) = summary.txt_lines {
        lines.push(count_line("TXT wrapped lines", n));
    }
    if let Some(n) = summary.ir_files {
        lines.push(count_line("IR files compiled", n));
    }
    if let Some(n) = summary.ir_commands {
        lines.push(count_line("IR commands compiled", n));
    }
    if let Some(n) = summary.portal_pages {
        lines.push(count_line("Portal HTML templates compiled", n));
    }
    lines
}

/// Print the summary to stdout, as JSON when `json` is set.
pub fn print_summary(summary: &Summary, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(summary).context("serialize summary")?;
        println!("{out}");
        return Ok(());
    }
    for line in summary_lines(summary) {
        println!("{line}");
    }
    if !summary.unchanged.is_empty() {
        info!(
            "{}",
            Colors::colorize(
                Colors::SKIPPED,
                &format!("{} header(s) already up to date", summary.unchanged.len())
            )
        );
    }
    Ok(())
}
