use assetpack::emit::{
    IdentRegistry, TXT_EMPTY_MESSAGE, byte_array, c_escape, escape_quotes, render_gif_header,
    render_image_header, render_ir_header, render_portal_header, render_text_header,
    sanitize_identifier, u16_array,
};
use assetpack::{
    Canvas, CommandFile, CommandRecord, GifAsset, GifFrame, ImageAsset, OutputTable, PortalPage,
    TextTable,
};

fn ir_table() -> OutputTable<CommandFile> {
    let mut power = CommandRecord::named("Power");
    power.protocol = "NEC".to_string();
    power.address = 0xA100;
    power.command = 0x5A;
    let mut raw = CommandRecord::named("Vol+");
    raw.kind = "raw".to_string();
    raw.raw_data = (1..=15).collect();
    OutputTable::new(vec![CommandFile {
        name: "TVs/LG.ir".to_string(),
        commands: vec![power, raw],
    }])
}

// --- identifiers and escaping ---

#[test]
fn test_sanitize_identifier() {
    assert_eq!(sanitize_identifier("logo"), "LOGO");
    assert_eq!(sanitize_identifier("my-logo v2"), "MY_LOGO_V2");
    assert_eq!(sanitize_identifier("01_intro"), "_01_INTRO");
    assert_eq!(sanitize_identifier("TVs/LG.ir_0_Power"), "TVS_LG_IR_0_POWER");
}

#[test]
fn test_ident_registry_suffixes_collisions() {
    let mut reg = IdentRegistry::default();
    assert_eq!(reg.claim("IMG_LOGO_RGB565"), "IMG_LOGO_RGB565");
    assert_eq!(reg.claim("IMG_LOGO_RGB565"), "IMG_LOGO_RGB565_2");
    assert_eq!(reg.claim("IMG_LOGO_RGB565"), "IMG_LOGO_RGB565_3");
    assert_eq!(reg.claim("IMG_OTHER_RGB565"), "IMG_OTHER_RGB565");
}

#[test]
fn test_escaping() {
    assert_eq!(c_escape("a\"b\\c\nd\te\r"), "a\\\"b\\\\c\\nd\\te\\r");
    assert_eq!(escape_quotes("say \"hi\" \\o/"), "say \\\"hi\\\" \\\\o/");
}

#[test]
fn test_array_line_layout() {
    let bytes: Vec<u8> = (0..17).collect();
    let arr = byte_array(&bytes, 16);
    let lines: Vec<&str> = arr.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "{");
    assert!(lines[1].starts_with("  0x00, 0x01,"));
    assert!(lines[1].ends_with("0x0F,"));
    assert_eq!(lines[2], "  0x10");
    assert_eq!(lines[3], "}");

    let samples: Vec<u16> = (1..=15).collect();
    let arr = u16_array(&samples, 14);
    assert!(arr.contains("  1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14,\n  15\n"));
}

// --- empty tables ---

#[test]
fn test_empty_image_header() {
    let h = render_image_header(&OutputTable::default());
    assert!(h.starts_with("#pragma once\n"));
    assert!(h.contains("struct BuiltinImage {"));
    assert!(h.contains("static const BuiltinImage IMAGE_TABLE[] = {};"));
    assert!(h.contains("static constexpr size_t IMAGE_COUNT = 0;"));
}

#[test]
fn test_empty_gif_header() {
    let h = render_gif_header(&OutputTable::default(), Canvas::default());
    assert!(h.contains("static constexpr uint16_t GIF_WIDTH = 240;"));
    assert!(h.contains("static constexpr uint16_t GIF_HEIGHT = 135;"));
    assert!(h.contains("static constexpr uint16_t GIF_ASSET_COUNT = 0;"));
    assert!(h.contains("static constexpr GifFrame GIF_EMPTY_FRAMES[] = {};"));
    assert!(h.contains("static constexpr GifAsset GIF_ASSETS[] = {};"));
    assert!(h.contains("static const GifFrame* GIF_FRAMES = GIF_EMPTY_FRAMES;"));
}

#[test]
fn test_empty_text_header() {
    let h = render_text_header(&TextTable::default());
    assert!(h.contains(&format!("TXT_EMPTY_MESSAGE = \"{TXT_EMPTY_MESSAGE}\";")));
    assert!(h.contains("static constexpr const char* TXT_LINES[] = {};"));
    assert!(h.contains("static constexpr size_t TXT_LINE_COUNT = 0;"));
    assert!(!h.contains("generated from"));
}

#[test]
fn test_empty_ir_and_portal_headers() {
    let h = render_ir_header(&OutputTable::default());
    assert!(h.contains("struct IrCommand {"));
    assert!(h.contains("static constexpr IrFile IR_FILES[] = {};"));
    assert!(h.contains("static constexpr size_t IR_FILE_COUNT = 0;"));

    let h = render_portal_header(&OutputTable::default());
    assert!(h.contains("struct PortalPage {"));
    assert!(h.contains("static const PortalPage PORTAL_PAGES[] = {};"));
    assert!(h.contains("static constexpr size_t PORTAL_PAGE_COUNT = 0;"));
}

// --- populated tables ---

#[test]
fn test_image_header_entries() {
    let table = OutputTable::new(vec![ImageAsset {
        name: "logo.png".to_string(),
        ident: "IMG_LOGO_RGB565".to_string(),
        width: 2,
        height: 1,
        rgb565: vec![0xF8, 0x00, 0x07, 0xE0],
    }]);
    let h = render_image_header(&table);
    assert!(h.contains("static const uint8_t IMG_LOGO_RGB565[] PROGMEM = {\n  0xF8, 0x00, 0x07, 0xE0\n};"));
    assert!(h.contains("  {\"logo.png\", 2, 1, IMG_LOGO_RGB565, sizeof(IMG_LOGO_RGB565)}"));
    assert!(h.contains("IMAGE_COUNT = sizeof(IMAGE_TABLE) / sizeof(IMAGE_TABLE[0]);"));
}

#[test]
fn test_gif_header_entries() {
    let frame = |d| GifFrame {
        rgb565: vec![0, 1],
        delay_ms: d,
    };
    let table = OutputTable::new(vec![
        GifAsset {
            name: "a.gif".to_string(),
            frames: vec![frame(120), frame(80)],
        },
        GifAsset {
            name: "b.gif".to_string(),
            frames: vec![frame(50)],
        },
    ]);
    let h = render_gif_header(&table, Canvas::new(1, 1));
    assert!(h.contains("static const uint8_t GIF_0_FRAME_1_RGB565[] PROGMEM"));
    assert!(h.contains("static const GifFrame GIF_0_FRAMES[] = {\n  {GIF_0_FRAME_0_RGB565, 120},\n  {GIF_0_FRAME_1_RGB565, 80}\n};"));
    assert!(h.contains("  {\"b.gif\", GIF_1_FRAMES, 1}"));
    assert!(h.contains("GIF_ASSET_COUNT = 2;"));
    assert!(h.contains("GIF_FRAMES = GIF_ASSET_COUNT ? GIF_ASSETS[0].frames : nullptr;"));
}

#[test]
fn test_text_header_entries() {
    let table = TextTable {
        source: Some("story.txt".to_string()),
        lines: vec!["He said \"hi\"".to_string(), String::new()],
    };
    let h = render_text_header(&table);
    assert!(h.contains("// UTF-8 lines generated from: story.txt"));
    assert!(h.contains("  \"He said \\\"hi\\\"\",\n  \"\"\n};"));
    assert!(h.contains("TXT_LINE_COUNT = sizeof(TXT_LINES) / sizeof(TXT_LINES[0]);"));
}

#[test]
fn test_ir_header_entries() {
    let h = render_ir_header(&ir_table());
    assert!(h.contains(
        "  {\"Power\", \"parsed\", \"NEC\", 0x0000A100u, 0x0000005Au, 38000u, 0.330000f, nullptr, 0}"
    ));
    assert!(h.contains("static const uint16_t IR_RAW_TVS_LG_IR_1_VOL_[] PROGMEM = {"));
    assert!(h.contains("IR_RAW_TVS_LG_IR_1_VOL_, 15}"));
    assert!(h.contains("  {\"TVs/LG.ir\", IR_FILE_0_CMDS, sizeof(IR_FILE_0_CMDS) / sizeof(IR_FILE_0_CMDS[0])}"));
    assert!(h.contains("IR_FILE_COUNT = sizeof(IR_FILES) / sizeof(IR_FILES[0]);"));
}

#[test]
fn test_portal_header_entries() {
    let table = OutputTable::new(vec![PortalPage {
        name: "index.html".to_string(),
        ident: "PORTAL_HTML_INDEX".to_string(),
        html: "<h1>Hello \"world\"</h1>\n".to_string(),
    }]);
    let h = render_portal_header(&table);
    assert!(h.contains(
        "static const char PORTAL_HTML_INDEX[] PROGMEM = R\"rawliteral(<h1>Hello \"world\"</h1>\n)rawliteral\";"
    ));
    assert!(h.contains("  {\"index.html\", PORTAL_HTML_INDEX, sizeof(PORTAL_HTML_INDEX) - 1}"));
}

#[test]
fn test_rendering_is_deterministic() {
    assert_eq!(render_ir_header(&ir_table()), render_ir_header(&ir_table()));
}

#[test]
fn test_escape_quotes_escapes_line_breaks() {
    assert_eq!(escape_quotes("a\rb\nc"), "a\\rb\\nc");
}

#[test]
fn test_empty_text_header_points_consumers_at_placeholder() {
    let h = render_text_header(&TextTable::default());
    assert!(h.contains("// TXT_LINES is empty when no document was compiled; display TXT_EMPTY_MESSAGE instead."));
}
