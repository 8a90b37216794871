//! Generators for auxiliary build output.
//!
//! - **Sitemap**: search engine indexing (`sitemap.xml`)
//!
//! Also hosts the whitespace minifiers applied to generated documents.

pub mod sitemap;

use std::borrow::Cow;

/// Minify XML content if enabled: trims every line and joins them.
pub fn minify_xml(content: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(content);
    }
    let mut out = String::with_capacity(content.len());
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        out.push_str(line);
    }
    Cow::Owned(out)
}

/// Minify HTML if enabled: drops indentation and blank lines.
///
/// Line breaks are kept, so inline text never merges across lines.
pub fn minify_html(content: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(content);
    }
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    Cow::Owned(lines.join("\n"))
}
