//! Image format tokens and the ordered format registry.
//!
//! Every token the site knows about is a [`SupportedFormat`]. A
//! [`FormatRegistry`] is an ordered, duplicate-free selection of them; the
//! standard registry holds all of them in their canonical order. Route
//! enumeration, route decoding and the page's format menu all read from the
//! same registry so they can never disagree.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A canonical image format token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SupportedFormat {
    Png,
    Jpeg,
    Jpg,
    Gif,
    Webp,
    Bmp,
    Ico,
    Tiff,
    Tga,
    /// Farbfeld
    Ff,
}

impl SupportedFormat {
    /// All formats in canonical order.
    pub const ALL: [Self; 10] = [
        Self::Png,
        Self::Jpeg,
        Self::Jpg,
        Self::Gif,
        Self::Webp,
        Self::Bmp,
        Self::Ico,
        Self::Tiff,
        Self::Tga,
        Self::Ff,
    ];

    /// Format used when nothing else selects one.
    pub const FALLBACK: Self = Self::Png;

    /// Canonical lowercase token, as it appears in URLs.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Jpg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Bmp => "bmp",
            Self::Ico => "ico",
            Self::Tiff => "tiff",
            Self::Tga => "tga",
            Self::Ff => "ff",
        }
    }

    /// Uppercase label shown in titles and the format menu trigger.
    pub fn label(self) -> String {
        self.token().to_ascii_uppercase()
    }

    /// Capitalized name shown in the format menu (`Png`, `Jpeg`, ...).
    pub fn menu_name(self) -> String {
        let token = self.token();
        let mut chars = token.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Decorative glyph for the format menu.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Png => "🖼️",
            Self::Jpg | Self::Jpeg => "📸",
            Self::Gif => "👾",
            Self::Webp => "🌐",
            Self::Ico => "✨",
            Self::Bmp => "🎨",
            Self::Tiff | Self::Tga | Self::Ff => "📄",
        }
    }

    /// File extension for converted downloads.
    pub const fn extension(self) -> &'static str {
        self.token()
    }

    /// MIME type of an encoded file in this format.
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg | Self::Jpg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Ico => "image/x-icon",
            Self::Tiff => "image/tiff",
            Self::Tga => "image/x-tga",
            Self::Ff => "image/x-farbfeld",
        }
    }
}

impl fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error for tokens outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported image format `{0}`")]
pub struct UnknownFormat(pub String);

impl FromStr for SupportedFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(Some(s)).ok_or_else(|| UnknownFormat(s.trim().to_string()))
    }
}

impl Serialize for SupportedFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for SupportedFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalize a raw token against the full format set.
///
/// Trims and lowercases; returns `None` for absent, empty or unknown input.
pub fn normalize(raw: Option<&str>) -> Option<SupportedFormat> {
    let cleaned = raw?.trim().to_ascii_lowercase();
    SupportedFormat::ALL
        .into_iter()
        .find(|format| format.token() == cleaned)
}

// ============================================================================
// Registry
// ============================================================================

/// Ordered, duplicate-free set of formats the site exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRegistry {
    formats: Vec<SupportedFormat>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl FormatRegistry {
    /// Registry with every supported format in canonical order.
    pub fn standard() -> Self {
        Self {
            formats: SupportedFormat::ALL.to_vec(),
        }
    }

    /// Registry over a selection of formats, keeping first occurrences.
    pub fn new(formats: impl IntoIterator<Item = SupportedFormat>) -> Self {
        let mut unique: Vec<SupportedFormat> = Vec::new();
        for format in formats {
            if !unique.contains(&format) {
                unique.push(format);
            }
        }
        Self { formats: unique }
    }

    /// Formats in stable enumeration order.
    pub fn formats(&self) -> &[SupportedFormat] {
        &self.formats
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn contains(&self, format: SupportedFormat) -> bool {
        self.formats.contains(&format)
    }

    /// Normalize a raw token, accepting only formats in this registry.
    pub fn normalize(&self, raw: Option<&str>) -> Option<SupportedFormat> {
        normalize(raw).filter(|format| self.contains(*format))
    }

    /// Format the page selects when nothing else decides: `png` if present,
    /// otherwise the first registered format.
    pub fn fallback(&self) -> SupportedFormat {
        if self.contains(SupportedFormat::FALLBACK) {
            SupportedFormat::FALLBACK
        } else {
            self.formats
                .first()
                .copied()
                .unwrap_or(SupportedFormat::FALLBACK)
        }
    }
}
