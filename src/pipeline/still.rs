//! Still images: decode, fit to the canvas, encode, optionally export the normalized result.

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::emit::{IdentRegistry, sanitize_identifier};
use crate::engine::progress::Progress;
use crate::engine::tools::{file_name_string, file_stem_string, list_files};
use crate::pipeline::pixel::{encode_rgb565, fit_image};
use crate::types::{EncodeOpts, ExportFormat, ImageAsset, OutputTable};
use crate::utils::config::IMAGE_EXTENSIONS;

/// Where normalized (fitted) images are saved alongside the header.
#[derive(Clone, Debug)]
pub struct ImageExport {
    pub dir: PathBuf,
    pub format: ExportFormat,
}

/// Decode any supported still image, sniffing the format from content.
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .with_context(|| format!("open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("sniff format of {}", path.display()))?
        .decode()
        .with_context(|| format!("decode {}", path.display()))
}

/// Compile every image directly inside `src_dir`. Undecodable images are skipped with a warning.
pub fn compile_images(
    src_dir: &Path,
    opts: &EncodeOpts,
    export: Option<&ImageExport>,
    verbose: bool,
) -> Result<OutputTable<ImageAsset>> {
    let files = list_files(src_dir, IMAGE_EXTENSIONS)?;
    let export = export.filter(|e| match std::fs::create_dir_all(&e.dir) {
        Ok(()) => true,
        Err(err) => {
            warn!("Not exporting normalized images to {}: {}", e.dir.display(), err);
            false
        }
    });

    let mut idents = IdentRegistry::default();
    let mut entries = Vec::with_capacity(files.len());
    let mut progress = Progress::new(verbose, files.len(), "Images", " images");
    for path in &files {
        progress.update(1);
        let img = match decode_image(path) {
            Ok(img) => img,
            Err(e) => {
                warn!("Skipping image {}: {:#}", path.display(), e);
                continue;
            }
        };
        let fitted = fit_image(img, opts);
        let stem = file_stem_string(path);

        if let Some(export) = export {
            let out = export
                .dir
                .join(format!("{}.{}", stem, export.format.extension()));
            if let Err(e) = fitted.save_with_format(&out, export.format.image_format()) {
                warn!("Could not export {}: {}", out.display(), e);
            }
        }

        let ident = idents.claim(&format!("IMG_{}_RGB565", sanitize_identifier(&stem)));
        debug!("{} -> {}", path.display(), ident);
        entries.push(ImageAsset {
            name: file_name_string(path),
            ident,
            width: opts.canvas.width,
            height: opts.canvas.height,
            rgb565: encode_rgb565(&fitted),
        });
    }
    progress.finish();
    Ok(OutputTable::new(entries))
}
