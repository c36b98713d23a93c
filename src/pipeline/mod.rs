//! Asset pipelines: each turns one source directory into an output table.

pub mod animation;
pub mod capture;
pub mod manifest;
pub mod pixel;
pub mod portal;
pub mod still;
pub mod text;

pub use animation::{FrameBudget, KeptFrame, TimingRule, compile_gifs, plan_frames, stride_for};
pub use capture::{compile_captures, parse_capture, parse_hex_bytes, select_within_budget};
pub use manifest::{indent_depth, parse_tree_manifest};
pub use pixel::{encode_rgb565, fit_image, pack_rgb565, unpack_rgb565};
pub use portal::{compile_portal_pages, is_safe_html};
pub use still::{ImageExport, compile_images};
pub use text::{compile_text, wrap_text_lines};
