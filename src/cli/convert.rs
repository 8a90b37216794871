//! `localmorph convert`: one conversion through a page session.
//!
//! Same gates as the page: the converter loads first, a file must be
//! selected, and the result is named after the input.

use crate::{
    cli::ConvertArgs,
    config::SiteConfig,
    convert::{ConvertError, Converter, ImageConverter},
    core::FormatRegistry,
    log,
    page::Session,
    utils::fs::write_file,
};
use anyhow::{Context, Result, bail};
use std::{path::PathBuf, sync::Arc};

/// Convert `args.input` and write the result, returning the output path.
pub fn convert_file(config: &SiteConfig, args: &ConvertArgs) -> Result<PathBuf> {
    check_offered(&config.registry(), args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    runtime.block_on(run(args, Arc::new(ImageConverter::new())))
}

fn check_offered(registry: &FormatRegistry, args: &ConvertArgs) -> Result<()> {
    if !registry.contains(args.to) {
        let offered: Vec<_> = registry.formats().iter().map(|f| f.token()).collect();
        bail!(
            "`{}` is not offered by this site (formats: {})",
            args.to,
            offered.join(", ")
        );
    }
    Ok(())
}

async fn run(args: &ConvertArgs, converter: Arc<dyn Converter>) -> Result<PathBuf> {
    let session = Session::start(args.to, async move { Ok::<_, ConvertError>(converter) });
    session.wait_until_settled().await;

    session.select_file(&args.input)?;
    session.choose_format(args.to);

    let download = session
        .convert()
        .await
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| args.input.with_file_name(&download.file_name));
    if out == args.input {
        bail!(
            "Refusing to overwrite {}; choose another path with --out",
            args.input.display()
        );
    }

    write_file(&out, &download.bytes)?;
    log!("convert"; "{} -> {} ({} bytes)", args.input.display(), out.display(), download.bytes.len());
    Ok(out)
}
