//! Core types - pure abstractions shared across the codebase.

pub mod format;
pub mod route;
mod state;

pub use format::{FormatRegistry, SupportedFormat};
pub use route::{FormatPair, Route, decode, enumerate_all};
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
