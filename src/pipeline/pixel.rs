//! Pixel encoder: fit arbitrary images to the canvas and pack them as big-endian RGB565.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

use crate::types::{Canvas, EncodeOpts, FitMode};

/// Pack one 8-bit RGB triple into RGB565 by truncation (no rounding, no dithering).
pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Inverse of [`pack_rgb565`] up to the truncated low bits.
pub fn unpack_rgb565(v: u16) -> [u8; 3] {
    [
        ((v >> 8) & 0xF8) as u8,
        ((v >> 3) & 0xFC) as u8,
        ((v << 3) & 0xF8) as u8,
    ]
}

/// Row-major big-endian RGB565 bytes; length is always `width * height * 2`.
pub fn encode_rgb565(img: &RgbImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(img.width() as usize * img.height() as usize * 2);
    for Rgb([r, g, b]) in img.pixels() {
        out.extend_from_slice(&pack_rgb565(*r, *g, *b).to_be_bytes());
    }
    out
}

/// Apply the optional left rotation, then fit to the canvas. Alpha is dropped, never blended.
pub fn fit_image(img: DynamicImage, opts: &EncodeOpts) -> RgbImage {
    let img = DynamicImage::ImageRgb8(img.to_rgb8());
    let img = if opts.rotate_left { img.rotate270() } else { img };
    let Canvas { width, height } = opts.canvas;
    match opts.fit {
        FitMode::Stretch => img.resize_exact(width, height, FilterType::Lanczos3).to_rgb8(),
        FitMode::Cover => img.resize_to_fill(width, height, FilterType::Lanczos3).to_rgb8(),
        FitMode::Contain => contain(&img, opts.canvas, opts.background),
    }
}

/// Uniform scale to fit inside `canvas`, centered on a `background` fill.
fn contain(img: &DynamicImage, canvas: Canvas, background: [u8; 3]) -> RgbImage {
    let scaled = img
        .resize(canvas.width, canvas.height, FilterType::Lanczos3)
        .to_rgb8();
    let mut out = RgbImage::from_pixel(canvas.width, canvas.height, Rgb(background));
    let x = (canvas.width.saturating_sub(scaled.width())) / 2;
    let y = (canvas.height.saturating_sub(scaled.height())) / 2;
    imageops::replace(&mut out, &scaled, x as i64, y as i64);
    out
}

/// Fit then encode: the full per-frame path shared by the image and animation pipelines.
pub fn prepare_frame(img: DynamicImage, opts: &EncodeOpts) -> Vec<u8> {
    encode_rgb565(&fit_image(img, opts))
}
