//! Animated GIFs under a global byte ceiling.
//!
//! Every sequence gets an equal share of the frame budget regardless of its native length.
//! Within a sequence, frames are kept at a fixed stride and each kept frame absorbs the delays
//! of the frames it stands in for, so total playback time is preserved.

use anyhow::{Context, Result, bail};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, Frame, Frames};
use log::{debug, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::engine::progress::Progress;
use crate::engine::tools::{file_name_string, list_files};
use crate::pipeline::pixel::prepare_frame;
use crate::types::{Canvas, EncodeOpts, GifAsset, GifFrame, OutputTable};
use crate::utils::config::{FALLBACK_FRAME_DELAY_MS, GIF_EXTENSIONS};

/// Frame budget for one run, derived from the byte ceiling and the number of sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBudget {
    pub frame_bytes: usize,
    pub max_total_frames: usize,
    pub max_per_sequence: usize,
}

impl FrameBudget {
    pub fn from_ceiling(canvas: Canvas, ceiling_bytes: usize, sequence_count: usize) -> Self {
        let frame_bytes = canvas.frame_bytes().max(1);
        let max_total_frames = (ceiling_bytes / frame_bytes).max(1);
        let max_per_sequence = (max_total_frames / sequence_count.max(1)).max(1);
        Self {
            frame_bytes,
            max_total_frames,
            max_per_sequence,
        }
    }
}

/// Skip interval that brings `native` frames down to at most `max_per_sequence`. Never 0.
pub fn stride_for(native: usize, max_per_sequence: usize) -> usize {
    native.div_ceil(max_per_sequence.max(1)).max(1)
}

/// How a kept frame's delay is derived from the window of source frames it represents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimingRule {
    /// Sum of the window's delays.
    SumWindow,
    /// Window average times `scale`, truncated, clamped to `[min_ms, max_ms]`.
    ScaledAverage { scale: f64, min_ms: u32, max_ms: u32 },
}

/// Assets whose playback was tuned by hand on the device. Matched on lowercase file name.
/// Fixed table; not a general mechanism.
const TIMING_OVERRIDES: &[(&str, TimingRule)] = &[(
    "ellen-joe.gif",
    TimingRule::ScaledAverage {
        scale: 1.6,
        min_ms: 90,
        max_ms: 260,
    },
)];

pub fn timing_rule_for(name: &str) -> TimingRule {
    let lower = name.to_lowercase();
    TIMING_OVERRIDES
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, rule)| *rule)
        .unwrap_or(TimingRule::SumWindow)
}

/// One frame that survives striding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeptFrame {
    /// Index into the native frame list.
    pub index: usize,
    pub delay_ms: u32,
}

/// Choose which of the native frames to keep and the delay each one is shown for.
/// `delays` are the native per-frame delays in ms; non-empty input always yields at least one frame.
pub fn plan_frames(delays: &[i64], max_per_sequence: usize, rule: TimingRule) -> Vec<KeptFrame> {
    let total = delays.len();
    let stride = stride_for(total, max_per_sequence);
    (0..total)
        .step_by(stride)
        .map(|start| {
            let window = &delays[start..(start + stride).min(total)];
            KeptFrame {
                index: start,
                delay_ms: window_delay(window, rule),
            }
        })
        .collect()
}

fn window_delay(window: &[i64], rule: TimingRule) -> u32 {
    let len = window.len().max(1) as i64;
    let mut sum: i64 = window.iter().sum();
    if sum <= 0 {
        sum = FALLBACK_FRAME_DELAY_MS * len;
    }
    match rule {
        TimingRule::SumWindow => sum.clamp(1, u32::MAX as i64) as u32,
        TimingRule::ScaledAverage {
            scale,
            min_ms,
            max_ms,
        } => {
            let avg = sum as f64 / len as f64;
            ((avg * scale) as i64).clamp(min_ms as i64, max_ms as i64) as u32
        }
    }
}

/// Native delay of a decoded frame in whole milliseconds.
fn frame_delay_ms(frame: &Frame) -> i64 {
    let (numer, denom) = frame.delay().numer_denom_ms();
    (numer as u64 / denom.max(1) as u64) as i64
}

fn open_frames(path: &Path) -> Result<Frames<'static>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let decoder = GifDecoder::new(BufReader::new(file))
        .with_context(|| format!("read GIF header of {}", path.display()))?;
    Ok(decoder.into_frames())
}

/// Native delay of every frame, in order. Frames are decoded one at a time and dropped.
pub fn read_frame_delays(path: &Path) -> Result<Vec<i64>> {
    let mut delays = Vec::new();
    for frame in open_frames(path)? {
        let frame = frame.with_context(|| format!("decode frames of {}", path.display()))?;
        delays.push(frame_delay_ms(&frame));
    }
    Ok(delays)
}

/// Composited frames at `indices` (ascending). Only those buffers are kept; decoding stops
/// after the last one.
pub fn decode_frames_at(path: &Path, indices: &[usize]) -> Result<Vec<Frame>> {
    let mut wanted = indices.iter().copied().peekable();
    let mut kept = Vec::with_capacity(indices.len());
    for (i, frame) in open_frames(path)?.enumerate() {
        let Some(&next) = wanted.peek() else {
            break;
        };
        let frame = frame.with_context(|| format!("decode frame {} of {}", i, path.display()))?;
        if i == next {
            kept.push(frame);
            wanted.next();
        }
    }
    if kept.len() != indices.len() {
        bail!(
            "{} has fewer frames than on the first pass ({} of {})",
            path.display(),
            kept.len(),
            indices.len()
        );
    }
    Ok(kept)
}

/// Compile every GIF directly inside `src_dir` under `ceiling_bytes`.
/// A GIF that fails to decode is skipped; it still counts toward the per-sequence share.
pub fn compile_gifs(
    src_dir: &Path,
    opts: &EncodeOpts,
    ceiling_bytes: usize,
    verbose: bool,
) -> Result<OutputTable<GifAsset>> {
    let files = list_files(src_dir, GIF_EXTENSIONS)?;
    if files.is_empty() {
        return Ok(OutputTable::default());
    }

    let budget = FrameBudget::from_ceiling(opts.canvas, ceiling_bytes, files.len());
    debug!(
        "GIF budget: {} bytes/frame, {} frames total, {} per sequence",
        budget.frame_bytes, budget.max_total_frames, budget.max_per_sequence
    );

    let mut assets = Vec::with_capacity(files.len());
    for path in &files {
        let name = file_name_string(path);
        let delays = match read_frame_delays(path) {
            Ok(delays) if !delays.is_empty() => delays,
            Ok(_) => {
                warn!("Skipping GIF {}: no frames", path.display());
                continue;
            }
            Err(e) => {
                warn!("Skipping GIF {}: {:#}", path.display(), e);
                continue;
            }
        };

        let plan = plan_frames(&delays, budget.max_per_sequence, timing_rule_for(&name));
        debug!(
            "{}: keeping {} of {} frames (stride {})",
            name,
            plan.len(),
            delays.len(),
            stride_for(delays.len(), budget.max_per_sequence)
        );
        let indices: Vec<usize> = plan.iter().map(|k| k.index).collect();
        let frames = match decode_frames_at(path, &indices) {
            Ok(frames) => frames,
            Err(e) => {
                warn!("Skipping GIF {}: {:#}", path.display(), e);
                continue;
            }
        };

        let mut progress = Progress::new(verbose, plan.len(), "Frames", " frames");
        let mut out = Vec::with_capacity(plan.len());
        for (kept, frame) in plan.iter().zip(frames) {
            out.push(GifFrame {
                rgb565: prepare_frame(DynamicImage::ImageRgba8(frame.into_buffer()), opts),
                delay_ms: kept.delay_ms,
            });
            progress.update(1);
        }
        progress.finish();
        assets.push(GifAsset { name, frames: out });
    }
    Ok(OutputTable::new(assets))
}
