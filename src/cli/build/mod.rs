//! Prerender driver.
//!
//! Build stages, all writing into a staging directory:
//! - **Client bundle** - hashed app script and stylesheet, public files
//! - **Server bundle** - in-process renderer over the configured registry
//! - **Shell** - custom or embedded document with both placeholders
//! - **Routes** - parallel render of every enumerated route
//! - **Sitemap** - one entry per route
//! - **Publish** - swap the staging directory into the output
//!
//! Any failure (or Ctrl+C) drops the staging directory and leaves the
//! previous output as it was.

mod shell;
mod staging;

use crate::{
    config::SiteConfig,
    core::{FormatRegistry, Route, enumerate_all, is_shutdown},
    debug,
    embed::{
        NoVars,
        client::{APP_CSS, APP_JS, ClientVars},
        shell::ShellVars,
    },
    generator::{minify_html, sitemap::Sitemap},
    log,
    logger::ProgressLine,
    page::Renderer,
    utils::{
        date::DateUtc,
        fs::{copy_dir, write_file},
    },
};
use anyhow::{Context, Result, anyhow, bail};
use parking_lot::Mutex;
use rayon::prelude::*;
use shell::HtmlShell;
use staging::Staging;
use std::path::{Path, PathBuf};

/// Directory the client bundle is written to, relative to the output.
const ASSETS_DIR: &str = "assets";

/// Summary of a published build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub output: PathBuf,
    pub routes: usize,
    pub sitemap: Option<PathBuf>,
}

/// Prerender the whole site and publish it to the output directory.
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildReport> {
    let output = &config.build.output;
    let staging = Staging::create(output, config.build.clean)?;
    let registry = config.registry();
    let base_url = config.base_url();

    let bundle = build_client_bundle(config, &registry, staging.path())?;

    let renderer = Renderer::new(
        registry,
        config.site.title.clone(),
        config.site.description.clone(),
        base_url.clone(),
    );
    let shell = HtmlShell::load(config.build.shell.as_deref(), &bundle.shell_vars())?;

    let routes = enumerate_all(renderer.registry());
    debug!("build"; "rendering {} routes for {}", routes.len(), base_url);
    render_routes(&renderer, &shell, &routes, staging.path(), config.build.minify, quiet)?;

    let sitemap = if config.build.sitemap.enable {
        let lastmod = DateUtc::today().to_string();
        Sitemap::from_routes(&routes, &base_url, &lastmod).write(
            &staging.path().join(&config.build.sitemap.path),
            config.build.minify,
        )?;
        Some(output.join(&config.build.sitemap.path))
    } else {
        None
    };

    if is_shutdown() {
        bail!("Build aborted");
    }
    staging.publish()?;

    if !quiet {
        log!("done"; "{} routes written to {}", routes.len(), output.display());
    }

    Ok(BuildReport {
        output: output.clone(),
        routes: routes.len(),
        sitemap,
    })
}

/// Browser URLs of the hashed client bundle.
struct ClientBundle {
    stylesheet: String,
    script: String,
}

impl ClientBundle {
    fn shell_vars(&self) -> ShellVars<'_> {
        ShellVars {
            stylesheet: &self.stylesheet,
            script: &self.script,
        }
    }
}

/// Copy public files, then write the app script and stylesheet.
fn build_client_bundle(
    config: &SiteConfig,
    registry: &FormatRegistry,
    dir: &Path,
) -> Result<ClientBundle> {
    let public = &config.build.public;
    if public.is_dir() {
        let copied = copy_dir(public, dir)?;
        debug!("build"; "copied {} files from {}", copied, public.display());
    }

    let assets = dir.join(ASSETS_DIR);
    let script = APP_JS.render(&ClientVars::new(registry, &config.build.converter));
    let stylesheet = APP_CSS.render(&NoVars);
    write_file(&assets.join(&script.filename), &script.content)?;
    write_file(&assets.join(&stylesheet.filename), &stylesheet.content)?;

    Ok(ClientBundle {
        stylesheet: format!("/{ASSETS_DIR}/{}", stylesheet.filename),
        script: format!("/{ASSETS_DIR}/{}", script.filename),
    })
}

/// Render every route in parallel, stopping at the first failure.
fn render_routes(
    renderer: &Renderer,
    shell: &HtmlShell,
    routes: &[Route],
    dir: &Path,
    minify: bool,
    quiet: bool,
) -> Result<()> {
    let progress = (!quiet).then(|| ProgressLine::new("build", &[("routes", routes.len())]));
    let failure = Mutex::new(None);

    let completed = routes.par_iter().try_for_each(|route| {
        let result = if is_shutdown() {
            Err(anyhow!("Build aborted"))
        } else {
            write_route(renderer, shell, *route, dir, minify)
        };

        match result {
            Ok(()) => {
                if let Some(progress) = &progress {
                    progress.inc("routes");
                }
                Ok(())
            }
            Err(e) => {
                let mut slot = failure.lock();
                if slot.is_none() {
                    *slot = Some(e);
                }
                Err(())
            }
        }
    });

    if completed.is_err() {
        return Err(failure
            .into_inner()
            .unwrap_or_else(|| anyhow!("Build failed")));
    }
    if let Some(progress) = progress {
        progress.finish();
    }
    Ok(())
}

fn write_route(
    renderer: &Renderer,
    shell: &HtmlShell,
    route: Route,
    dir: &Path,
    minify: bool,
) -> Result<()> {
    let html = shell
        .render(&renderer.render(route))
        .with_context(|| format!("Failed to render {route}"))?;
    let html = minify_html(&html, minify);
    write_file(&route.output_file(dir), html.as_bytes())
        .with_context(|| format!("Failed to write {route}"))
}
