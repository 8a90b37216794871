//! Mapping between URL paths and format pairs.
//!
//! Page routes have the shape `/<source>-to-<target>` (trailing slash
//! tolerated), plus the root `/`. Decoding is a pure function of the path
//! and is shared by the prerenderer, the preview server and (mirrored) the
//! browser bootstrap, so a given URL always selects the same formats.
//!
//! ```text
//! /png-to-jpg   -> Some(png -> jpg)
//! /PNG-to-Jpg/  -> Some(png -> jpg)
//! /png-to-png   -> None   (source equals target)
//! /xyz-to-png   -> None   (unknown token)
//! /             -> None
//! ```

use super::format::{FormatRegistry, SupportedFormat};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `/<token>-to-<token>` with an optional trailing slash.
static ROUTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(.+?)-to-(.+?)/?$").expect("route pattern is valid"));

/// A validated (source, target) combination with distinct members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatPair {
    pub source: SupportedFormat,
    pub target: SupportedFormat,
}

impl FormatPair {
    /// Build a pair, rejecting degenerate `x -> x` combinations.
    pub fn new(source: SupportedFormat, target: SupportedFormat) -> Option<Self> {
        (source != target).then_some(Self { source, target })
    }

    /// URL path of this pair's page.
    pub fn path(&self) -> String {
        format!("/{}-to-{}", self.source, self.target)
    }
}

/// A prerendered page route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Pair(FormatPair),
}

impl Route {
    /// URL path: `/` or `/<source>-to-<target>`.
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Pair(pair) => pair.path(),
        }
    }

    pub const fn pair(&self) -> Option<FormatPair> {
        match self {
            Self::Root => None,
            Self::Pair(pair) => Some(*pair),
        }
    }

    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// `/` -> `{dir}/index.html`, `/a-to-b` -> `{dir}/a-to-b/index.html`
    pub fn output_file(&self, dir: &Path) -> PathBuf {
        match self {
            Self::Root => dir.join("index.html"),
            Self::Pair(pair) => dir
                .join(format!("{}-to-{}", pair.source, pair.target))
                .join("index.html"),
        }
    }

    /// Absolute URL of the served page, in directory form.
    ///
    /// `https://x.app` + `/png-to-jpg` -> `https://x.app/png-to-jpg/`
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Self::Root => format!("{base}/"),
            Self::Pair(pair) => format!("{base}{}/", pair.path()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Extract the path component from a request target or absolute URL.
fn path_component(raw: &str) -> String {
    if let Ok(parsed) = url::Url::parse(raw) {
        return parsed.path().to_string();
    }
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = &raw[..end];
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Decode a path into a format pair.
///
/// Malformed paths, unknown tokens and equal tokens all decode to `None`,
/// which callers treat as the root page.
pub fn decode(registry: &FormatRegistry, path: &str) -> Option<FormatPair> {
    let path = path_component(path);
    let captures = ROUTE_PATTERN.captures(&path)?;
    let source = registry.normalize(captures.get(1).map(|m| m.as_str()))?;
    let target = registry.normalize(captures.get(2).map(|m| m.as_str()))?;
    FormatPair::new(source, target)
}

/// Every route the site serves: root, then each ordered pair of distinct
/// formats, source-major in registry order.
///
/// Yields `1 + N * (N - 1)` routes for a registry of size `N`.
pub fn enumerate_all(registry: &FormatRegistry) -> Vec<Route> {
    let formats = registry.formats();
    let n = formats.len();
    let mut routes = Vec::with_capacity(1 + n * n.saturating_sub(1));
    routes.push(Route::Root);
    for &source in formats {
        for &target in formats {
            if let Some(pair) = FormatPair::new(source, target) {
                routes.push(Route::Pair(pair));
            }
        }
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn std_registry() -> FormatRegistry {
        FormatRegistry::standard()
    }

    #[test]
    fn test_decode_every_pair_round_trips() {
        let registry = std_registry();
        for &source in registry.formats() {
            for &target in registry.formats() {
                if source == target {
                    continue;
                }
                let path = format!("/{source}-to-{target}");
                let expected = Some(FormatPair { source, target });
                assert_eq!(decode(&registry, &path), expected, "{path}");
                assert_eq!(decode(&registry, &format!("{path}/")), expected, "{path}/");
            }
        }
    }

    #[test]
    fn test_decode_equal_tokens_is_empty() {
        let registry = std_registry();
        assert_eq!(decode(&registry, "/png-to-png"), None);
        assert_eq!(decode(&registry, "/PNG-to-png"), None);
        assert_eq!(decode(&registry, "/jpg-to-jpg/"), None);
    }

    #[test]
    fn test_decode_unknown_token_is_empty() {
        let registry = std_registry();
        assert_eq!(decode(&registry, "/xyz-to-png"), None);
        assert_eq!(decode(&registry, "/png-to-xyz"), None);
    }

    #[test]
    fn test_decode_root_and_malformed() {
        let registry = std_registry();
        for path in [
            "/",
            "",
            "/foo",
            "/png-jpg",
            "/png_to_jpg",
            "/png-to-",
            "/-to-jpg",
            "/png-to-jpg/extra",
            "/a/png-to-jpg",
            "/png-to-jpg-to-gif",
        ] {
            assert_eq!(decode(&registry, path), None, "{path:?}");
        }
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        let registry = std_registry();
        let expected = FormatPair::new(SupportedFormat::Png, SupportedFormat::Webp);
        assert_eq!(decode(&registry, "/PNG-to-WEBP"), expected);
        assert_eq!(decode(&registry, "/Png-to-Webp/"), expected);
    }

    #[test]
    fn test_decode_ignores_query_and_origin() {
        let registry = std_registry();
        let expected = FormatPair::new(SupportedFormat::Gif, SupportedFormat::Bmp);
        assert_eq!(decode(&registry, "/gif-to-bmp?ref=home"), expected);
        assert_eq!(decode(&registry, "/gif-to-bmp/#top"), expected);
        assert_eq!(decode(&registry, "https://localmorph.app/gif-to-bmp/"), expected);
    }

    #[test]
    fn test_decode_respects_registry_selection() {
        let registry = FormatRegistry::new([SupportedFormat::Png, SupportedFormat::Jpg]);
        assert!(decode(&registry, "/png-to-jpg").is_some());
        assert_eq!(decode(&registry, "/png-to-gif"), None);
    }

    #[test]
    fn test_enumerate_all_count_and_uniqueness() {
        let registry = std_registry();
        let n = registry.len();
        let routes = enumerate_all(&registry);
        assert_eq!(routes.len(), 1 + n * (n - 1));

        let paths: HashSet<_> = routes.iter().map(Route::path).collect();
        assert_eq!(paths.len(), routes.len());
        assert_eq!(routes[0], Route::Root);
    }

    #[test]
    fn test_enumerate_all_round_trips_through_decode() {
        let registry = std_registry();
        for route in enumerate_all(&registry).into_iter().skip(1) {
            let decoded = decode(&registry, &route.path());
            assert!(decoded.is_some(), "{route}");
            assert_eq!(decoded, route.pair());
        }
    }

    #[test]
    fn test_enumerate_two_formats() {
        let registry = FormatRegistry::new([SupportedFormat::Png, SupportedFormat::Jpg]);
        let paths: Vec<_> = enumerate_all(&registry).iter().map(Route::path).collect();
        assert_eq!(paths, ["/", "/png-to-jpg", "/jpg-to-png"]);
    }

    #[test]
    fn test_enumerate_empty_and_single_registry() {
        assert_eq!(enumerate_all(&FormatRegistry::new([])), [Route::Root]);
        assert_eq!(
            enumerate_all(&FormatRegistry::new([SupportedFormat::Png])),
            [Route::Root]
        );
    }

    #[test]
    fn test_output_file() {
        let dir = Path::new("/out");
        assert_eq!(Route::Root.output_file(dir), Path::new("/out/index.html"));
        let route = Route::Pair(decode(&std_registry(), "/png-to-jpg").unwrap());
        assert_eq!(
            route.output_file(dir),
            Path::new("/out/png-to-jpg/index.html")
        );
    }

    #[test]
    fn test_route_url() {
        let route = Route::Pair(decode(&std_registry(), "/tga-to-ico").unwrap());
        assert_eq!(route.url("https://x.app/"), "https://x.app/tga-to-ico/");
        assert_eq!(Route::Root.url("https://x.app"), "https://x.app/");
    }
}
