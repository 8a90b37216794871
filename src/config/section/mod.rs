//! Configuration sections of `localmorph.toml`.

mod build;
mod serve;
mod site;

pub use build::BuildSectionConfig;
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;

#[cfg(test)]
pub use site::DEFAULT_BASE_URL;
