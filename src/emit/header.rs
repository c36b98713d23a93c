//! Render output tables as self-contained C++ headers.
//!
//! Every header declares its structs, payload arrays, one lookup table and a count, and
//! stays a valid declaration when the table is empty. Output depends only on the table
//! contents, so identical inputs give byte-identical headers.

use crate::emit::escape::{IdentRegistry, byte_array, c_escape, escape_quotes, sanitize_identifier, u16_array};
use crate::types::{Canvas, CommandFile, GifAsset, ImageAsset, OutputTable, PortalPage, TextTable};

/// Hex bytes per line in pixel arrays.
const BYTES_PER_LINE: usize = 16;
/// Values per line in timing sample arrays.
const SAMPLES_PER_LINE: usize = 14;

/// Closes a `R"rawliteral(` string; a template containing it cannot be embedded.
pub const RAW_LITERAL_END: &str = ")rawliteral\"";

/// Placeholder for consumers to display when `TXT_LINE_COUNT` is 0. Never added to `TXT_LINES`.
pub const TXT_EMPTY_MESSAGE: &str = "No TXT compiled yet.";

const PROGMEM_GUARD: &str = "#ifndef PROGMEM\n#define PROGMEM\n#endif\n";

const IMAGE_STRUCT: &str = "\
struct BuiltinImage {
  const char* name;
  uint16_t width;
  uint16_t height;
  const uint8_t* rgb565;
  size_t bytes;
};
";

const GIF_STRUCTS: &str = "\
struct GifFrame {
  const uint8_t* rgb565;
  uint32_t delay_ms;
};

struct GifAsset {
  const char* name;
  const GifFrame* frames;
  uint16_t frame_count;
};
";

const IR_STRUCTS: &str = "\
struct IrCommand {
  const char* name;
  const char* type;
  const char* protocol;
  uint32_t address;
  uint32_t command;
  uint32_t frequency;
  float duty_cycle;
  const uint16_t* raw_data;
  size_t raw_len;
};

struct IrFile {
  const char* name;
  const IrCommand* commands;
  size_t command_count;
};
";

const PORTAL_STRUCT: &str = "\
struct PortalPage {
  const char* name;
  const char* html;
  size_t bytes;
};
";

/// Accumulates header text section by section, one blank line between sections.
struct Header {
    out: String,
}

impl Header {
    fn new(includes: &[&str], progmem: bool) -> Self {
        let mut out = String::from("#pragma once\n");
        for inc in includes {
            out.push_str(&format!("#include <{inc}>\n"));
        }
        let mut h = Self { out };
        if progmem {
            h.section(PROGMEM_GUARD);
        }
        h
    }

    /// Append `text` (expected to end in a newline) after a blank line.
    fn section(&mut self, text: &str) {
        self.out.push('\n');
        self.out.push_str(text);
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}

/// `{\n  a,\n  b\n}` or `{}` when empty.
fn initializer(entries: &[String]) -> String {
    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{\n{}\n}}", entries.join(",\n"))
    }
}

fn count_expr(table: &str, count: usize) -> String {
    if count == 0 {
        "0".to_string()
    } else {
        format!("sizeof({table}) / sizeof({table}[0])")
    }
}

pub fn render_image_header(table: &OutputTable<ImageAsset>) -> String {
    let mut h = Header::new(&["stdint.h", "stddef.h"], true);
    h.section(IMAGE_STRUCT);
    for img in table.iter() {
        h.section(&format!(
            "static const uint8_t {}[] PROGMEM = {};\n",
            img.ident,
            byte_array(&img.rgb565, BYTES_PER_LINE)
        ));
    }
    let entries: Vec<String> = table
        .iter()
        .map(|img| {
            format!(
                "  {{\"{}\", {}, {}, {}, sizeof({})}}",
                escape_quotes(&img.name),
                img.width,
                img.height,
                img.ident,
                img.ident
            )
        })
        .collect();
    h.section(&format!(
        "static const BuiltinImage IMAGE_TABLE[] = {};\n",
        initializer(&entries)
    ));
    h.section(&format!(
        "static constexpr size_t IMAGE_COUNT = {};\n",
        count_expr("IMAGE_TABLE", table.count())
    ));
    h.finish()
}

pub fn render_gif_header(table: &OutputTable<GifAsset>, canvas: Canvas) -> String {
    let mut h = Header::new(&["stdint.h"], true);
    h.section(GIF_STRUCTS);

    let mut asset_entries = Vec::with_capacity(table.count());
    for (gi, gif) in table.iter().enumerate() {
        let mut frame_entries = Vec::with_capacity(gif.frame_count());
        for (fi, frame) in gif.frames.iter().enumerate() {
            let arr = format!("GIF_{gi}_FRAME_{fi}_RGB565");
            h.section(&format!(
                "static const uint8_t {arr}[] PROGMEM = {};\n",
                byte_array(&frame.rgb565, BYTES_PER_LINE)
            ));
            frame_entries.push(format!("  {{{arr}, {}}}", frame.delay_ms));
        }
        let list = format!("GIF_{gi}_FRAMES");
        h.section(&format!(
            "static const GifFrame {list}[] = {};\n",
            initializer(&frame_entries)
        ));
        asset_entries.push(format!(
            "  {{\"{}\", {list}, {}}}",
            c_escape(&gif.name),
            gif.frame_count()
        ));
    }

    h.out.push('\n');
    h.line(&format!("static constexpr uint16_t GIF_WIDTH = {};", canvas.width));
    h.line(&format!("static constexpr uint16_t GIF_HEIGHT = {};", canvas.height));
    h.line(&format!(
        "static constexpr uint16_t GIF_ASSET_COUNT = {};",
        table.count()
    ));
    if table.is_empty() {
        h.line("static constexpr GifFrame GIF_EMPTY_FRAMES[] = {};");
        h.line("static constexpr GifAsset GIF_ASSETS[] = {};");
        h.line("static const uint16_t GIF_FRAME_COUNT = 0;");
        h.line("static const GifFrame* GIF_FRAMES = GIF_EMPTY_FRAMES;");
    } else {
        h.line(&format!(
            "static const GifAsset GIF_ASSETS[] = {};",
            initializer(&asset_entries)
        ));
        h.line("static const uint16_t GIF_FRAME_COUNT = GIF_ASSET_COUNT ? GIF_ASSETS[0].frame_count : 0;");
        h.line("static const GifFrame* GIF_FRAMES = GIF_ASSET_COUNT ? GIF_ASSETS[0].frames : nullptr;");
    }
    h.finish()
}

pub fn render_text_header(table: &TextTable) -> String {
    let mut h = Header::new(&["stddef.h"], false);
    let mut body = String::new();
    if let Some(source) = &table.source {
        body.push_str(&format!(
            "// UTF-8 lines generated from: {}\n",
            source.replace(['\r', '\n'], " ")
        ));
    }
    body.push_str("// TXT_LINES is empty when no document was compiled; display TXT_EMPTY_MESSAGE instead.\n");
    body.push_str(&format!(
        "static constexpr const char* TXT_EMPTY_MESSAGE = \"{}\";\n",
        escape_quotes(TXT_EMPTY_MESSAGE)
    ));
    let entries: Vec<String> = table
        .lines
        .iter()
        .map(|l| format!("  \"{}\"", escape_quotes(l)))
        .collect();
    body.push_str(&format!(
        "static constexpr const char* TXT_LINES[] = {};\n",
        initializer(&entries)
    ));
    body.push_str(&format!(
        "static constexpr size_t TXT_LINE_COUNT = {};\n",
        count_expr("TXT_LINES", table.count())
    ));
    h.section(&body);
    h.finish()
}

pub fn render_ir_header(table: &OutputTable<CommandFile>) -> String {
    let mut h = Header::new(&["stddef.h", "stdint.h"], true);
    h.section(IR_STRUCTS);

    let mut idents = IdentRegistry::default();
    let mut file_entries = Vec::with_capacity(table.count());
    for (fi, file) in table.iter().enumerate() {
        let mut cmd_entries = Vec::with_capacity(file.commands.len());
        for (ci, cmd) in file.commands.iter().enumerate() {
            let (raw_ref, raw_len) = if cmd.raw_data.is_empty() {
                ("nullptr".to_string(), 0)
            } else {
                let id = sanitize_identifier(&format!("{}_{}_{}", file.name, ci, cmd.name));
                let raw_name = idents.claim(&format!("IR_RAW_{id}"));
                h.section(&format!(
                    "static const uint16_t {raw_name}[] PROGMEM = {};\n",
                    u16_array(&cmd.raw_data, SAMPLES_PER_LINE)
                ));
                (raw_name, cmd.raw_data.len())
            };
            cmd_entries.push(format!(
                "  {{\"{}\", \"{}\", \"{}\", 0x{:08X}u, 0x{:08X}u, {}u, {:.6}f, {}, {}}}",
                escape_quotes(&cmd.name),
                escape_quotes(&cmd.kind),
                escape_quotes(&cmd.protocol),
                cmd.address,
                cmd.command,
                cmd.frequency,
                cmd.duty_cycle,
                raw_ref,
                raw_len
            ));
        }
        let arr = format!("IR_FILE_{fi}_CMDS");
        h.section(&format!(
            "static const IrCommand {arr}[] PROGMEM = {};\n",
            initializer(&cmd_entries)
        ));
        file_entries.push(format!(
            "  {{\"{}\", {arr}, sizeof({arr}) / sizeof({arr}[0])}}",
            escape_quotes(&file.name)
        ));
    }

    let qualifier = if table.is_empty() { "constexpr" } else { "const" };
    h.section(&format!(
        "static {qualifier} IrFile IR_FILES[] = {};\n",
        initializer(&file_entries)
    ));
    h.line(&format!(
        "static constexpr size_t IR_FILE_COUNT = {};",
        count_expr("IR_FILES", table.count())
    ));
    h.finish()
}

pub fn render_portal_header(table: &OutputTable<PortalPage>) -> String {
    let mut h = Header::new(&["stddef.h", "stdint.h"], true);
    h.section(PORTAL_STRUCT);
    for page in table.iter() {
        h.section(&format!(
            "static const char {}[] PROGMEM = R\"rawliteral({}{};\n",
            page.ident, page.html, RAW_LITERAL_END
        ));
    }
    let entries: Vec<String> = table
        .iter()
        .map(|p| {
            format!(
                "  {{\"{}\", {}, sizeof({}) - 1}}",
                escape_quotes(&p.name),
                p.ident,
                p.ident
            )
        })
        .collect();
    h.section(&format!(
        "static const PortalPage PORTAL_PAGES[] = {};\n",
        initializer(&entries)
    ));
    h.line(&format!(
        "static constexpr size_t PORTAL_PAGE_COUNT = {};",
        count_expr("PORTAL_PAGES", table.count())
    ));
    h.finish()
}
