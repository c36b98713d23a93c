use assetpack::TextTable;
use assetpack::emit::render_text_header;
use assetpack::pipeline::{compile_text, wrap_text_lines};
use std::fs;

#[test]
fn test_wrap_basic() {
    assert_eq!(wrap_text_lines("aaaa bbbb cccc", 9), vec!["aaaa bbbb", "cccc"]);
}

#[test]
fn test_wrap_exact_fit_stays_on_line() {
    assert_eq!(wrap_text_lines("ab cd", 5), vec!["ab cd"]);
    assert_eq!(wrap_text_lines("ab cde", 5), vec!["ab", "cde"]);
}

#[test]
fn test_wrap_overlong_word_kept_whole() {
    assert_eq!(
        wrap_text_lines("hi supercalifragilistic yo", 6),
        vec!["hi", "supercalifragilistic", "yo"]
    );
}

#[test]
fn test_wrap_preserves_blank_lines() {
    assert_eq!(
        wrap_text_lines("one\n\ntwo three\n", 20),
        vec!["one", "", "two three"]
    );
}

#[test]
fn test_wrap_counts_chars_not_bytes() {
    // 4 + 1 + 4 chars, more bytes than 9
    assert_eq!(wrap_text_lines("éééé àààà", 9), vec!["éééé àààà"]);
}

#[test]
fn test_compile_text_only_first_document() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("b.txt"), "second document").unwrap();
    fs::write(tmp.path().join("a.txt"), "aaaa bbbb cccc").unwrap();

    let table = compile_text(tmp.path(), 9).unwrap();
    assert_eq!(table.source.as_deref(), Some("a.txt"));
    assert_eq!(table.lines, vec!["aaaa bbbb", "cccc"]);
}

#[test]
fn test_compile_text_no_documents() {
    let tmp = tempfile::tempdir().unwrap();
    let table = compile_text(&tmp.path().join("txt"), 34).unwrap();
    assert_eq!(table.source, None);
    assert_eq!(table.count(), 0);
}

#[test]
fn test_wrap_carriage_return_only_line_endings() {
    assert_eq!(wrap_text_lines("one\rtwo three", 34), vec!["one", "two three"]);
    assert_eq!(
        wrap_text_lines("aaaa bbbb cccc\r\rdd\r\n", 9),
        vec!["aaaa bbbb", "cccc", "", "dd"]
    );
}

#[test]
fn test_text_header_has_no_raw_line_breaks_in_literals() {
    let table = TextTable {
        source: Some("cr.txt".to_string()),
        lines: wrap_text_lines("one\rtwo three", 34),
    };
    let h = render_text_header(&table);
    assert!(!h.contains('\r'));
    assert!(h.contains("  \"one\",\n  \"two three\"\n};"));
}
