//! Process-wide shutdown state.
//!
//! `SHUTDOWN` is set by the Ctrl+C handler. The build pipeline polls it
//! between route renders and aborts like any other build failure, so an
//! interrupted build never publishes partial output.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tiny_http::Server;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// HTTP server reference for graceful shutdown
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}

/// Setup the global Ctrl+C handler. Call once at program start
///
/// - Preview server registered: unblock it so the request loop returns.
/// - Otherwise: only set the flag; a running build notices it and aborts.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if let Some(server) = SERVER.get() {
            crate::log!("serve"; "shutting down...");
            server.unblock();
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the preview server so Ctrl+C can stop its request loop
pub fn register_server(server: Arc<Server>) {
    let _ = SERVER.set(server);
}
