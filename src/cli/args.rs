//! Command-line interface definitions.

use crate::core::SupportedFormat;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// LocalMorph: prerendered offline image converter site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: localmorph.toml, optional)
    #[arg(short = 'C', long, global = true, default_value = "localmorph.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Prerender every route and write the sitemap
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Preview the built site over HTTP
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Serve the existing output without building first
        #[arg(long)]
        no_build: bool,
    },

    /// Print every route the site serves
    #[command(visible_alias = "r")]
    Routes {
        #[command(flatten)]
        args: RoutesArgs,
    },

    /// Convert one image file through the page's conversion flow
    #[command(visible_alias = "c")]
    Convert {
        #[command(flatten)]
        args: ConvertArgs,
    },
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Remove leftovers of interrupted builds before building
    #[arg(short, long)]
    pub clean: bool,

    /// Minify the generated HTML and sitemap
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override the public base URL.
    ///
    /// Takes precedence over LOCALMORPH_BASE_URL and `site.url`.
    ///
    /// Example:
    ///   localmorph build --site-url "https://convert.example.org"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Routes command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RoutesArgs {
    /// Print a JSON array instead of one route per line
    #[arg(short, long)]
    pub json: bool,

    /// Print absolute URLs instead of paths
    #[arg(short, long)]
    pub urls: bool,

    /// Override the public base URL used with --urls
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,
}

/// Convert command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Image file to convert
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Target format (png, jpg, webp, ...)
    #[arg(short, long)]
    pub to: SupportedFormat,

    /// Where to write the result (default: next to the input)
    #[arg(long = "out", value_hint = clap::ValueHint::FilePath)]
    pub out: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
