//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"                 # Published output directory
//! public = "public"               # Copied verbatim into the output
//! minify = true                   # Minify HTML and sitemap
//! formats = ["png", "jpg"]        # Narrow the format registry
//! shell = "shell.html"            # Custom document shell
//! converter = "/pkg/localmorph_converter.js"
//!
//! [build.sitemap]
//! enable = true
//! path = "sitemap.xml"
//! ```

use crate::config::ConfigDiagnostics;
use crate::core::{FormatRegistry, SupportedFormat};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Module URL the browser imports the converter from.
pub const DEFAULT_CONVERTER_URL: &str = "/pkg/localmorph_converter.js";

/// Build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Output directory, swapped in whole after a successful build.
    pub output: PathBuf,

    /// Static files copied into the output (e.g. the converter module).
    pub public: PathBuf,

    /// Minify generated HTML and XML.
    pub minify: bool,

    /// Formats exposed by the site, in menu and route order.
    pub formats: Option<Vec<SupportedFormat>>,

    /// Custom HTML shell; the embedded one is used when unset.
    pub shell: Option<PathBuf>,

    /// Module URL of the converter, as seen from the browser.
    pub converter: String,

    /// Sitemap generation.
    pub sitemap: SitemapConfig,

    /// Remove leftovers of interrupted builds first (CLI only).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            public: "public".into(),
            minify: true,
            formats: None,
            shell: None,
            converter: DEFAULT_CONVERTER_URL.into(),
            sitemap: SitemapConfig::default(),
            clean: false,
        }
    }
}

/// `[build.sitemap]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation.
    pub enable: bool,
    /// Output path, relative to the output directory.
    pub path: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
        }
    }
}

impl BuildSectionConfig {
    /// Registry selected by `formats`, or every supported format.
    pub fn registry(&self) -> FormatRegistry {
        match &self.formats {
            Some(formats) => FormatRegistry::new(formats.iter().copied()),
            None => FormatRegistry::standard(),
        }
    }

    /// Validate build configuration.
    ///
    /// Paths are expected to be resolved against the project root already.
    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if self.formats.as_ref().is_some_and(Vec::is_empty) {
            diag.error_with_hint(
                "build.formats",
                "must list at least one format",
                "remove the key to expose every supported format",
            );
        }

        if self.output == root || root.starts_with(&self.output) {
            diag.error(
                "build.output",
                format!(
                    "`{}` would replace the project directory",
                    self.output.display()
                ),
            );
        }

        if let Some(shell) = &self.shell
            && !shell.is_file()
        {
            diag.error("build.shell", format!("`{}` not found", shell.display()));
        }

        if !is_plain_relative(&self.sitemap.path) {
            diag.error_with_hint(
                "build.sitemap.path",
                format!("`{}` must stay inside the output", self.sitemap.path.display()),
                "use a relative path such as \"sitemap.xml\"",
            );
        }

        if self.converter.trim().is_empty() {
            diag.error("build.converter", "must not be empty");
        }
    }
}

/// Relative path without `..` or root components.
fn is_plain_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}
