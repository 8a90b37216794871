//! Bootstrap payload shared between server render and client hydration.
//!
//! Each prerendered document carries
//! `<script>window.__LOCAL_MORPH_SSR__={"source":..,"target":..};</script>`
//! right after the mount point. The browser reads exactly these two fields
//! before falling back to the URL, then to the registry fallback.

use crate::core::{FormatPair, FormatRegistry, SupportedFormat, decode};
use crate::utils::html::escape_script_json;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Global the payload is assigned to.
pub const BOOTSTRAP_GLOBAL: &str = "__LOCAL_MORPH_SSR__";

/// Initial state embedded for hydration. Both members are null on the root
/// page and on any path that does not decode to a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapPayload {
    pub source: Option<SupportedFormat>,
    pub target: Option<SupportedFormat>,
}

impl From<Option<FormatPair>> for BootstrapPayload {
    fn from(pair: Option<FormatPair>) -> Self {
        Self {
            source: pair.map(|p| p.source),
            target: pair.map(|p| p.target),
        }
    }
}

impl BootstrapPayload {
    /// Inline script assigning the payload to [`BOOTSTRAP_GLOBAL`].
    pub fn script_tag(&self) -> Result<String> {
        let json = serde_json::to_string(self).context("Failed to serialize bootstrap payload")?;
        Ok(format!(
            "<script>window.{BOOTSTRAP_GLOBAL}={};</script>",
            escape_script_json(&json)
        ))
    }

    /// Parse a payload from a prerendered document.
    ///
    /// Returns `None` when the script is missing or malformed.
    #[cfg(test)]
    pub fn from_document(html: &str) -> Option<Self> {
        let marker = format!("window.{BOOTSTRAP_GLOBAL}=");
        let start = html.find(&marker)? + marker.len();
        let end = start + html[start..].find(";</script>")?;
        serde_json::from_str(&html[start..end]).ok()
    }
}

/// Target format selected when the page first paints.
///
/// Priority: the embedded payload for this navigation, then the pair decoded
/// from `path`, then the registry fallback. Server render and hydration run
/// the same function, so the selection never flips during hydration.
pub fn initial_format(
    registry: &FormatRegistry,
    embedded: Option<&BootstrapPayload>,
    path: &str,
) -> SupportedFormat {
    embedded
        .and_then(|payload| payload.target)
        .filter(|format| registry.contains(*format))
        .or_else(|| decode(registry, path).map(|pair| pair.target))
        .unwrap_or_else(|| registry.fallback())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(source: SupportedFormat, target: SupportedFormat) -> Option<FormatPair> {
        FormatPair::new(source, target)
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = BootstrapPayload::from(pair(SupportedFormat::Png, SupportedFormat::Jpg));
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"source":"png","target":"jpg"}"#);

        let empty = serde_json::to_string(&BootstrapPayload::from(None)).unwrap();
        assert_eq!(empty, r#"{"source":null,"target":null}"#);
    }

    #[test]
    fn test_script_tag_round_trips() {
        let payload = BootstrapPayload::from(pair(SupportedFormat::Tga, SupportedFormat::Ico));
        let tag = payload.script_tag().unwrap();
        assert_eq!(
            tag,
            r#"<script>window.__LOCAL_MORPH_SSR__={"source":"tga","target":"ico"};</script>"#
        );
        let html = format!("<div id=\"root\"></div>{tag}");
        assert_eq!(BootstrapPayload::from_document(&html), Some(payload));
    }

    #[test]
    fn test_from_document_missing_or_malformed() {
        assert_eq!(BootstrapPayload::from_document("<html></html>"), None);
        let html = "<script>window.__LOCAL_MORPH_SSR__={\"target\":\"svg\"};</script>";
        assert_eq!(BootstrapPayload::from_document(html), None);
    }

    #[test]
    fn test_initial_format_priority() {
        let registry = FormatRegistry::standard();
        let embedded = BootstrapPayload::from(pair(SupportedFormat::Png, SupportedFormat::Webp));

        // Embedded payload wins over the URL
        assert_eq!(
            initial_format(&registry, Some(&embedded), "/png-to-gif"),
            SupportedFormat::Webp
        );
        // URL when nothing is embedded
        assert_eq!(
            initial_format(&registry, None, "/png-to-gif/"),
            SupportedFormat::Gif
        );
        // Null payload falls through to the URL
        assert_eq!(
            initial_format(&registry, Some(&BootstrapPayload::default()), "/bmp-to-tiff"),
            SupportedFormat::Tiff
        );
        // Fallback
        assert_eq!(initial_format(&registry, None, "/"), SupportedFormat::Png);
        assert_eq!(
            initial_format(&registry, None, "/png-to-png"),
            SupportedFormat::Png
        );
    }

    #[test]
    fn test_initial_format_ignores_unregistered_payload() {
        let registry = FormatRegistry::new([SupportedFormat::Png, SupportedFormat::Jpg]);
        let embedded = BootstrapPayload::from(pair(SupportedFormat::Png, SupportedFormat::Gif));
        assert_eq!(
            initial_format(&registry, Some(&embedded), "/png-to-jpg"),
            SupportedFormat::Jpg
        );
    }
}
