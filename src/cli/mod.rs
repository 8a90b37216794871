//! Command-line interface module.

mod args;
pub mod build;
pub mod convert;
pub mod routes;
pub mod serve;

pub use args::{BuildArgs, Cli, Commands, ConvertArgs, RoutesArgs};
