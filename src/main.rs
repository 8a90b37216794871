//! LocalMorph - prerenderer and preview server for an offline image converter.

mod cli;
mod config;
mod convert;
mod core;
mod embed;
mod generator;
mod logger;
mod page;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config, false).map(|_| ()),
        Commands::Serve { no_build, .. } => cli::serve::serve_site(&config, *no_build),
        Commands::Routes { args } => cli::routes::print_routes(&config, args),
        Commands::Convert { args } => cli::convert::convert_file(&config, args).map(|_| ()),
    }
}
