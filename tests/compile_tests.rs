use assetpack::compile::{compile_assets, summary_lines};
use assetpack::pipeline::{compile_portal_pages, is_safe_html};
use assetpack::{Canvas, Opts, Task, compile_dir};
use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::{self, File};
use std::path::Path;

fn write_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([10, 200, 30]))
        .save(path)
        .unwrap();
}

fn write_gif(path: &Path, frames: usize) {
    let mut encoder = GifEncoder::new(File::create(path).unwrap());
    let frames: Vec<Frame> = (0..frames)
        .map(|i| {
            let buf = RgbaImage::from_pixel(12, 6, Rgba([(i * 40) as u8, 0, 0, 255]));
            Frame::from_parts(buf, 0, 0, Delay::from_numer_denom_ms(100, 1))
        })
        .collect();
    encoder.encode_frames(frames).unwrap();
}

/// A data tree with one asset of each kind plus a rejected portal template.
fn populate(data: &Path) {
    for dir in ["img", "gifs", "txt", "ir/TVs", "portal_html"] {
        fs::create_dir_all(data.join(dir)).unwrap();
    }
    write_png(&data.join("img/logo.png"), 30, 20);
    write_png(&data.join("img/logo.bmp"), 10, 10);
    fs::write(data.join("img/broken.png"), b"not an image").unwrap();
    write_gif(&data.join("gifs/spin.gif"), 4);
    fs::write(data.join("txt/intro.txt"), "aaaa bbbb cccc").unwrap();
    fs::write(
        data.join("ir/TVs/LG.ir"),
        "Filetype: IR signals file\nVersion: 1\nname: Power\ntype: parsed\nprotocol: NEC\naddress: 04 00 00 00\ncommand: 08 00 00 00\n",
    )
    .unwrap();
    fs::write(data.join("portal_html/index.html"), "<h1>Welcome</h1>").unwrap();
    fs::write(
        data.join("portal_html/login.html"),
        "<form><input TYPE=\"password\"></form>",
    )
    .unwrap();
}

fn small_opts(root: &Path) -> Opts {
    let mut opts = Opts {
        data_dir: root.join("data"),
        out_dir: root.join("out"),
        txt_max_chars: 9,
        ..Default::default()
    };
    opts.encode.canvas = Canvas::new(16, 8);
    opts
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join("out").join(rel)).unwrap()
}

// --- portal gate ---

#[test]
fn test_is_safe_html() {
    assert!(is_safe_html("<h1>hi</h1><input type=\"text\" name=\"ssid\">"));
    assert!(!is_safe_html("<input type='password'>"));
    assert!(!is_safe_html("<input NAME=\"Email\">"));
    assert!(!is_safe_html("Sign in with Gmail"));
}

#[test]
fn test_portal_excludes_unsafe_and_unterminated_templates() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a.html"), "<p>ok</p>").unwrap();
    fs::write(tmp.path().join("b.htm"), "<input name='password'>").unwrap();
    fs::write(tmp.path().join("c.html"), "<p>)rawliteral\"</p>").unwrap();
    fs::write(tmp.path().join("d.txt"), "<p>not a template</p>").unwrap();

    let table = compile_portal_pages(tmp.path()).unwrap();
    assert_eq!(table.count(), 1);
    assert_eq!(table.entries[0].name, "a.html");
    assert_eq!(table.entries[0].ident, "PORTAL_HTML_A");
    assert_eq!(table.entries[0].html, "<p>ok</p>");
}

// --- full runs ---

#[test]
fn test_compile_all_writes_every_destination() {
    let tmp = tempfile::tempdir().unwrap();
    populate(&tmp.path().join("data"));
    let opts = small_opts(tmp.path());

    let summary = compile_dir(Task::All, &opts).unwrap();
    assert_eq!(summary.images, Some(2));
    assert_eq!(summary.gif_frames, Some(4));
    assert_eq!(summary.txt_lines, Some(2));
    assert_eq!(summary.ir_files, Some(1));
    assert_eq!(summary.ir_commands, Some(1));
    assert_eq!(summary.portal_pages, Some(1));
    assert_eq!(summary.written.len(), 7);
    assert!(summary.unchanged.is_empty());

    let img = read(tmp.path(), "idk-img/include/generated/img_assets.h");
    assert!(img.contains("IMG_LOGO_RGB565[]"));
    assert!(img.contains("IMG_LOGO_RGB565_2[]"));
    assert!(img.contains("{\"logo.bmp\", 16, 8, IMG_LOGO_RGB565, sizeof(IMG_LOGO_RGB565)}"));
    assert_eq!(img, read(tmp.path(), "idk-cyd/include/generated/cyd_img_assets.h"));

    let gif = read(tmp.path(), "idk-gif/include/generated/gif_asset.h");
    assert!(gif.contains("{\"spin.gif\", GIF_0_FRAMES, 4}"));
    assert!(gif.contains("GIF_WIDTH = 16;"));

    let txt = read(tmp.path(), "idk-txt/include/generated/txt_asset.h");
    assert!(txt.contains("\"aaaa bbbb\""));

    let ir = read(tmp.path(), "idk-ir/include/generated/ir_assets.h");
    assert!(ir.contains("{\"TVs/LG.ir\", IR_FILE_0_CMDS"));
    assert!(ir.contains("0x00000004u, 0x00000008u"));

    let portal = read(tmp.path(), "idk-portal/include/generated/portal_pages.h");
    assert!(portal.contains("PORTAL_HTML_INDEX"));
    assert!(!portal.contains("password"));

    let exports = tmp.path().join("out/tools/out/normalized_img");
    assert!(exports.join("logo.png").is_file());
    assert_eq!(image::open(exports.join("logo.png")).unwrap().width(), 16);
}

#[test]
fn test_second_run_leaves_headers_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    populate(&tmp.path().join("data"));
    let opts = small_opts(tmp.path());

    let first = compile_assets(Task::All, &opts).unwrap();
    let second = compile_assets(Task::All, &opts).unwrap();
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged.len(), first.written.len());
}

#[test]
fn test_single_task_runs_only_that_pipeline() {
    let tmp = tempfile::tempdir().unwrap();
    populate(&tmp.path().join("data"));
    let opts = small_opts(tmp.path());

    let summary = compile_assets(Task::Txt, &opts).unwrap();
    assert_eq!(summary.txt_lines, Some(2));
    assert_eq!(summary.images, None);
    assert_eq!(summary.ir_files, None);
    assert_eq!(summary.written.len(), 1);
    assert!(!tmp.path().join("out/idk-img").exists());

    let lines = summary_lines(&summary);
    assert_eq!(lines[0], "Asset compilation done");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("- TXT wrapped lines: "));
}

#[test]
fn test_empty_data_root_emits_empty_tables() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = small_opts(tmp.path());

    let summary = compile_dir(Task::All, &opts).unwrap();
    assert_eq!(summary.images, Some(0));
    assert_eq!(summary.gif_frames, Some(0));
    assert_eq!(summary.txt_lines, Some(0));
    assert_eq!(summary.ir_files, Some(0));
    assert_eq!(summary.portal_pages, Some(0));

    assert!(read(tmp.path(), "idk-img/include/generated/img_assets.h").contains("IMAGE_COUNT = 0;"));
    assert!(read(tmp.path(), "idk-gif/include/generated/gif_asset.h").contains("GIF_EMPTY_FRAMES"));
    assert!(read(tmp.path(), "idk-txt/include/generated/txt_asset.h").contains("TXT_LINE_COUNT = 0;"));
    assert!(read(tmp.path(), "idk-ir/include/generated/ir_assets.h").contains("IR_FILE_COUNT = 0;"));
    assert!(read(tmp.path(), "idk-portal/include/generated/portal_pages.h").contains("PORTAL_PAGE_COUNT = 0;"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    populate(&tmp.path().join("data"));
    let mut opts = small_opts(tmp.path());
    opts.dry_run = true;

    let summary = compile_dir(Task::All, &opts).unwrap();
    assert_eq!(summary.written.len(), 7);
    assert_eq!(summary.export_dir, None);
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_zero_canvas_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let mut opts = small_opts(tmp.path());
    opts.encode.canvas = Canvas::new(0, 8);
    assert!(compile_dir(Task::Img, &opts).is_err());
}

#[test]
fn test_summary_serializes_to_json() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = small_opts(tmp.path());
    let summary = compile_assets(Task::Ir, &opts).unwrap();
    let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["ir_files"], 0);
    assert_eq!(json["images"], serde_json::Value::Null);
    assert_eq!(json["written"].as_array().unwrap().len(), 1);
}
