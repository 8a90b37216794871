//! Sitemap generation.
//!
//! One `<url>` per enumerated route, in enumeration order.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://localmorph.app/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use crate::core::Route;
use crate::generator::minify_xml;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Change frequency advertised for every page.
pub const CHANGEFREQ: &str = "weekly";

/// Priority of the root page.
pub const ROOT_PRIORITY: f32 = 1.0;

/// Priority of every pair page.
pub const PAIR_PRIORITY: f32 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: f32,
}

impl UrlEntry {
    fn for_route(route: &Route, base_url: &str, lastmod: &str) -> Self {
        Self {
            loc: route.url(base_url),
            lastmod: lastmod.to_string(),
            changefreq: CHANGEFREQ,
            priority: if route.is_root() {
                ROOT_PRIORITY
            } else {
                PAIR_PRIORITY
            },
        }
    }
}

impl Sitemap {
    /// Entries for `routes` under `base_url`, all stamped with `lastmod`
    /// (`YYYY-MM-DD`).
    pub fn from_routes(routes: &[Route], base_url: &str, lastmod: &str) -> Self {
        Self {
            urls: routes
                .iter()
                .map(|route| UrlEntry::for_route(route, base_url, lastmod))
                .collect(),
        }
    }

    #[cfg(test)]
    pub fn urls(&self) -> &[UrlEntry] {
        &self.urls
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(128 + self.urls.len() * 160);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in &self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n    <lastmod>");
            xml.push_str(&escape_xml(&entry.lastmod));
            xml.push_str("</lastmod>\n    <changefreq>");
            xml.push_str(entry.changefreq);
            xml.push_str("</changefreq>\n");
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write the document to `path`, creating parent directories.
    pub fn write(self, path: &Path, minify: bool) -> Result<()> {
        let xml = self.into_xml();
        let xml = minify_xml(&xml, minify);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, xml.as_bytes())
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FormatRegistry, SupportedFormat, enumerate_all};
    use tempfile::TempDir;

    fn two_format_routes() -> Vec<Route> {
        enumerate_all(&FormatRegistry::new([SupportedFormat::Png, SupportedFormat::Jpg]))
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_entries_follow_routes() {
        let sitemap = Sitemap::from_routes(&two_format_routes(), "https://x.app/", "2025-03-04");
        let locs: Vec<_> = sitemap.urls().iter().map(|u| u.loc.as_str()).collect();
        assert_eq!(
            locs,
            [
                "https://x.app/",
                "https://x.app/png-to-jpg/",
                "https://x.app/jpg-to-png/"
            ]
        );
        assert_eq!(sitemap.urls()[0].priority, ROOT_PRIORITY);
        assert!(sitemap.urls()[1..].iter().all(|u| u.priority == PAIR_PRIORITY));
        assert!(sitemap.urls().iter().all(|u| u.changefreq == "weekly"));
    }

    #[test]
    fn test_xml_document() {
        let xml = Sitemap::from_routes(&two_format_routes(), "https://x.app", "2025-03-04")
            .into_xml();
        let lines: Vec<&str> = xml.lines().collect();

        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(lines[1], format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert_eq!(xml.matches("<priority>1.0</priority>").count(), 1);
        assert_eq!(xml.matches("<priority>0.8</priority>").count(), 2);
        assert_eq!(xml.matches("<lastmod>2025-03-04</lastmod>").count(), 3);
        assert_eq!(lines.last().copied(), Some("</urlset>"));
    }

    #[test]
    fn test_empty_sitemap() {
        let xml = Sitemap::from_routes(&[], "https://x.app", "2025-03-04").into_xml();
        assert!(xml.contains("<urlset"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_base_url_is_escaped() {
        let xml = Sitemap::from_routes(&[Route::Root], "https://x.app/?a=1&b=2", "2025-03-04")
            .into_xml();
        assert!(xml.contains("&amp;b=2"));
    }

    #[test]
    fn test_write_minified() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/sitemap.xml");
        Sitemap::from_routes(&two_format_routes(), "https://x.app", "2025-03-04")
            .write(&path, true)
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains('\n'));
        assert!(written.contains("<url><loc>https://x.app/</loc>"));
    }
}
