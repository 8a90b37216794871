//! Local preview server for the prerendered site.
//!
//! Serves the output directory the way a static host would: pair pages in
//! directory form, redirects for missing trailing slashes, and the root page
//! for any other extension-less path.

mod path;
mod response;

use crate::{
    cli::build::build_site,
    config::SiteConfig,
    core::{is_shutdown, register_server},
    debug, log,
};
use anyhow::{Context, Result, anyhow, bail};
use path::Resolved;
use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Method, Request, Server};

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Build (unless `no_build`), then serve the output until Ctrl+C.
pub fn serve_site(config: &SiteConfig, no_build: bool) -> Result<()> {
    let root = config.build.output.clone();

    if no_build {
        if !root.join("index.html").is_file() {
            bail!(
                "No prerendered site in {}; run `localmorph build` first",
                root.display()
            );
        }
    } else {
        build_site(config, false)?;
    }

    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    run_request_loop(&server, root)
}

/// Bind to the specified interface and port, trying the next ports when busy.
fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

fn run_request_loop(server: &Server, root: PathBuf) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .context("Failed to create request thread pool")?;
    let root = Arc::new(root);

    // Ends once the Ctrl+C handler unblocks the server
    for request in server.incoming_requests() {
        let root = Arc::clone(&root);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &root) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, root: &Path) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }
    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    debug!("serve"; "{} {}", request.method(), request.url());

    match path::resolve(request.url(), root) {
        Resolved::File(path) | Resolved::Fallback(path) => response::respond_file(request, &path),
        Resolved::Redirect(location) => response::respond_redirect(request, &location),
        Resolved::NotFound => response::respond_not_found(request),
    }
}
