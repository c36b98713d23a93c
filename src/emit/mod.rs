//! C/C++ header emission.

pub mod escape;
pub mod header;

pub use escape::{IdentRegistry, byte_array, c_escape, escape_quotes, sanitize_identifier, u16_array};
pub use header::{
    RAW_LITERAL_END, TXT_EMPTY_MESSAGE, render_gif_header, render_image_header, render_ir_header,
    render_portal_header, render_text_header,
};
