//! Site configuration management for `localmorph.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site], [build], [serve]
//! ├── error          # ConfigError, ConfigDiagnostics
//! ├── util           # config file lookup, path resolution
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The config file is optional: without one every section takes its
//! defaults and the project root is the working directory.
//!
//! # Base URL precedence
//!
//! `--site-url` > `LOCALMORPH_BASE_URL` > `[site] url` > `https://localmorph.app`

mod error;
mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{BuildSectionConfig, ServeConfig, SiteSectionConfig};

use crate::cli::{BuildArgs, Cli, Commands};
use crate::core::FormatRegistry;
use crate::log;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use util::{find_config_file, resolve_against};

/// Default config file name.
pub const CONFIG_FILE: &str = "localmorph.toml";

/// Environment variable overriding the public base URL.
pub const BASE_URL_ENV: &str = "LOCALMORPH_BASE_URL";

/// Root configuration structure representing localmorph.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root: the config file's directory, else the working directory
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(cli, &cwd, |key| std::env::var(key).ok())
    }

    /// Load configuration searching upward from `cwd`, reading environment
    /// overrides through `env`.
    pub fn load_from(
        cli: &Cli,
        cwd: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config_path = find_config_file(&cli.config, cwd);

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            // A missing default config is fine, a missing explicit one is not
            None if cli.config != Path::new(CONFIG_FILE) => {
                bail!(ConfigError::NotFound(cli.config.clone()))
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", CONFIG_FILE);
                Self::default()
            }
        };

        let root = config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);

        config.config_path = config_path;
        config.root = root;
        config.apply_env(&env);
        config.apply_command_options(cli);
        config.normalize_paths(cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Effective public base URL, without a trailing slash.
    pub fn base_url(&self) -> String {
        self.site.base_url()
    }

    /// Format registry shared by routing, rendering and the sitemap.
    pub fn registry(&self) -> FormatRegistry {
        self.build.registry()
    }

    // ========================================================================
    // overrides
    // ========================================================================

    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) {
        if let Some(url) = env(BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            self.site.url = Some(url.trim().to_string());
        }
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Serve {
                build_args,
                interface,
                port,
                ..
            } => {
                self.apply_build_args(build_args);
                self.apply_serve_options(*interface, *port);
            }
            Commands::Routes { args } => {
                if let Some(url) = &args.site_url {
                    self.site.url = Some(url.clone());
                }
            }
            Commands::Convert { args } => crate::logger::set_verbose(args.verbose),
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
        self.build.clean = args.clean;

        if let Some(url) = &args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Apply serve-specific options.
    fn apply_serve_options(&mut self, interface: Option<std::net::IpAddr>, port: Option<u16>) {
        Self::update_option(&mut self.serve.interface, interface.as_ref());
        Self::update_option(&mut self.serve.port, port.as_ref());

        // Local preview links point at the preview server unless a URL was given
        if self.site.url.is_none() {
            self.site.url = Some(format!(
                "http://{}",
                std::net::SocketAddr::new(self.serve.interface, self.serve.port)
            ));
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve configured paths against the project root.
    fn normalize_paths(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        self.build.output = resolve_against(&self.root, &self.build.output);
        self.build.public = resolve_against(&self.root, &self.build.public);
        if let Some(shell) = self.build.shell.take() {
            self.build.shell = Some(resolve_against(&self.root, &shell));
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();
        self.site.validate(&mut diag);
        self.build.validate(&self.root, &mut diag);
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content. Panics on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Config for a project rooted at `root`, with paths resolved.
#[cfg(test)]
pub fn test_site_config(root: &Path, content: &str) -> SiteConfig {
    let mut config = test_parse_config(content);
    config.root = root.to_path_buf();
    config.build.output = resolve_against(root, &config.build.output);
    config.build.public = resolve_against(root, &config.build.public);
    if let Some(shell) = config.build.shell.take() {
        config.build.shell = Some(resolve_against(root, &shell));
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::section::DEFAULT_BASE_URL;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("localmorph").chain(args.iter().copied()))
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn with_config(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), content).unwrap();
        dir
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::parse_with_ignored("[site\ntitle = \"x\"").is_err());
    }

    #[test]
    fn test_load_without_config_file() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::load_from(&cli(&["build"]), dir.path(), no_env).unwrap();

        assert!(config.config_path.is_none());
        assert_eq!(config.root, dir.path());
        assert_eq!(config.build.output, dir.path().join("dist"));
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.registry(), FormatRegistry::standard());
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let dir = TempDir::new().unwrap();
        let err = SiteConfig::load_from(&cli(&["-C", "custom.toml", "build"]), dir.path(), no_env)
            .unwrap_err();
        assert!(err.to_string().contains("custom.toml"));
    }

    #[test]
    fn test_root_is_config_directory() {
        let dir = with_config("[build]\noutput = \"public_html\"");
        let nested = dir.path().join("sub");
        fs::create_dir_all(&nested).unwrap();

        let config = SiteConfig::load_from(&cli(&["build"]), &nested, no_env).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.build.output, dir.path().join("public_html"));
    }

    #[test]
    fn test_base_url_precedence() {
        let dir = with_config("[site]\nurl = \"https://config.example\"");
        let env = |key: &str| (key == BASE_URL_ENV).then(|| "https://env.example".to_string());

        let config = SiteConfig::load_from(&cli(&["build"]), dir.path(), no_env).unwrap();
        assert_eq!(config.base_url(), "https://config.example");

        let config = SiteConfig::load_from(&cli(&["build"]), dir.path(), env).unwrap();
        assert_eq!(config.base_url(), "https://env.example");

        let args = ["build", "--site-url", "https://flag.example/"];
        let config = SiteConfig::load_from(&cli(&args), dir.path(), env).unwrap();
        assert_eq!(config.base_url(), "https://flag.example");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let dir = TempDir::new().unwrap();
        let env = |_: &str| Some("  ".to_string());
        let config = SiteConfig::load_from(&cli(&["build"]), dir.path(), env).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        let dir = TempDir::new().unwrap();
        let env = |_: &str| Some("localmorph.app".to_string());
        assert!(SiteConfig::load_from(&cli(&["build"]), dir.path(), env).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let dir = with_config("[build]\nminify = true\n[build.sitemap]\nenable = true");
        let args = ["-o", "out", "build", "--minify", "false", "--sitemap", "false", "--clean"];
        let config = SiteConfig::load_from(&cli(&args), dir.path(), no_env).unwrap();

        assert_eq!(config.build.output, dir.path().join("out"));
        assert!(!config.build.minify);
        assert!(!config.build.sitemap.enable);
        assert!(config.build.clean);
    }

    #[test]
    fn test_serve_defaults_to_local_url() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::load_from(&cli(&["serve", "-p", "8080"]), dir.path(), no_env)
            .unwrap();
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_unknown_fields_only_warn() {
        let dir = with_config("[build]\nwatch = true");
        assert!(SiteConfig::load_from(&cli(&["build"]), dir.path(), no_env).is_ok());
    }
}
