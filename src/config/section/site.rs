//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "LocalMorph"
//! description = "Convert images without uploading them"
//! url = "https://localmorph.app"
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};

/// Base URL used when neither the CLI, the environment nor the config set one.
pub const DEFAULT_BASE_URL: &str = "https://localmorph.app";

/// Site metadata used in titles, meta tags and absolute URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title, the suffix of every page title.
    pub title: String,

    /// Meta description; a format list is generated when unset.
    pub description: Option<String>,

    /// Public base URL for canonical links and the sitemap.
    pub url: Option<String>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: "LocalMorph".into(),
            description: None,
            url: None,
        }
    }
}

impl SiteSectionConfig {
    /// Effective base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        self.url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Validate site configuration.
    ///
    /// `url` must be absolute http(s) with a host.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error("site.title", "must not be empty");
        }

        let Some(raw) = self.url.as_deref() else {
            return;
        };
        match url::Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            Ok(url) => diag.error_with_hint(
                "site.url",
                format!("unsupported URL `{raw}` (scheme `{}`)", url.scheme()),
                "use an absolute http or https URL",
            ),
            Err(e) => diag.error_with_hint(
                "site.url",
                format!("invalid URL `{raw}`: {e}"),
                "e.g. url = \"https://localmorph.app\"",
            ),
        }
    }
}
