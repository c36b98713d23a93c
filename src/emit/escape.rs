//! Identifier sanitizing, string escaping and array literal formatting for C/C++ headers.

use std::collections::HashSet;

/// Turn an arbitrary name into an uppercase C identifier: anything outside `[A-Za-z0-9_]`
/// becomes `_`, and a leading digit gets a `_` prefix.
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident.to_ascii_uppercase()
}

/// Hands out identifiers, suffixing `_2`, `_3`, ... when a name was already claimed
/// (e.g. `logo.png` and `logo.jpg` in the same table).
#[derive(Debug, Default)]
pub struct IdentRegistry {
    used: HashSet<String>,
}

impl IdentRegistry {
    pub fn claim(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}_{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Escape for a C string literal: backslash, double quote, `\n`, `\r`, `\t`.
pub fn c_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape backslash and double quote for single-line names and text lines. Stray line
/// breaks are escaped too so a literal never spans lines.
pub fn escape_quotes(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}

/// `{ 0x.., ... }` with `per_line` hex bytes per line, two-space indent.
pub fn byte_array(data: &[u8], per_line: usize) -> String {
    let lines: Vec<String> = data
        .chunks(per_line.max(1))
        .map(|chunk| {
            let items: Vec<String> = chunk.iter().map(|b| format!("0x{b:02X}")).collect();
            format!("  {}", items.join(", "))
        })
        .collect();
    format!("{{\n{}\n}}", lines.join(",\n"))
}

/// `{ n, ... }` with `per_line` decimal values per line, two-space indent.
pub fn u16_array(data: &[u16], per_line: usize) -> String {
    let lines: Vec<String> = data
        .chunks(per_line.max(1))
        .map(|chunk| {
            let items: Vec<String> = chunk.iter().map(u16::to_string).collect();
            format!("  {}", items.join(", "))
        })
        .collect();
    format!("{{\n{}\n}}", lines.join(",\n"))
}
