//! Content-Type lookup for files served by the preview server.

use std::path::Path;

pub const HTML: &str = "text/html; charset=utf-8";
pub const OCTET_STREAM: &str = "application/octet-stream";
pub const PLAIN: &str = "text/plain; charset=utf-8";

/// Guess the Content-Type header value from a file extension.
pub fn from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("html" | "htm") => HTML,
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json" | "map") => "application/json",
        Some("xml") => "application/xml",
        Some("txt") => PLAIN,
        Some("wasm") => "application/wasm",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("webmanifest") => "application/manifest+json",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(from_path(Path::new("index.html")), HTML);
        assert_eq!(from_path(Path::new("pkg/converter_bg.wasm")), "application/wasm");
        assert_eq!(from_path(Path::new("assets/app-0123456789.JS")), "text/javascript; charset=utf-8");
        assert_eq!(from_path(Path::new("sitemap.xml")), "application/xml");
        assert_eq!(from_path(Path::new("LICENSE")), OCTET_STREAM);
    }
}
