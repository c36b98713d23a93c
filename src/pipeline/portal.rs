//! Captive-portal HTML templates, embedded verbatim once they pass a denylist.

use anyhow::Result;
use log::{debug, warn};
use std::path::Path;

use crate::emit::{IdentRegistry, RAW_LITERAL_END, sanitize_identifier};
use crate::engine::tools::{file_name_string, file_stem_string, list_files, read_text_lossy};
use crate::types::{OutputTable, PortalPage};
use crate::utils::config::HTML_EXTENSIONS;

/// Markers of credential-capture pages. Matched case-insensitively anywhere in the template.
const DENYLIST: &[&str] = &[
    "type=\"password\"",
    "type='password'",
    "name=\"password\"",
    "name='password'",
    "name=\"email\"",
    "name='email'",
    "gmail",
];

/// False if the template contains any denylisted marker.
pub fn is_safe_html(html: &str) -> bool {
    let lowered = html.to_lowercase();
    !DENYLIST.iter().any(|bad| lowered.contains(bad))
}

/// Compile every template in `src_dir`. Rejected templates are left out whole, never sanitized.
pub fn compile_portal_pages(src_dir: &Path) -> Result<OutputTable<PortalPage>> {
    let files = list_files(src_dir, HTML_EXTENSIONS)?;
    let mut idents = IdentRegistry::default();
    let mut pages = Vec::new();
    for path in &files {
        let html = match read_text_lossy(path) {
            Ok(html) => html,
            Err(e) => {
                warn!("Skipping template {}: {:#}", path.display(), e);
                continue;
            }
        };
        if !is_safe_html(&html) {
            debug!("rejected template {}", path.display());
            continue;
        }
        // Would terminate the raw string literal early.
        if html.contains(RAW_LITERAL_END) {
            warn!("Skipping template {}: contains {}", path.display(), RAW_LITERAL_END);
            continue;
        }
        let stem = file_stem_string(path);
        pages.push(PortalPage {
            name: file_name_string(path),
            ident: idents.claim(&format!("PORTAL_HTML_{}", sanitize_identifier(&stem))),
            html,
        });
    }
    Ok(OutputTable::new(pages))
}
