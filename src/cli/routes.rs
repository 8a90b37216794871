//! `localmorph routes`: list every prerendered route.

use crate::{cli::RoutesArgs, config::SiteConfig, core::enumerate_all};
use anyhow::{Context, Result};

pub fn print_routes(config: &SiteConfig, args: &RoutesArgs) -> Result<()> {
    println!("{}", list_routes(config, args)?);
    Ok(())
}

/// Paths (or absolute URLs with `--urls`), one per line or as a JSON array.
fn list_routes(config: &SiteConfig, args: &RoutesArgs) -> Result<String> {
    let base_url = config.base_url();
    let entries: Vec<String> = enumerate_all(&config.registry())
        .iter()
        .map(|route| {
            if args.urls {
                route.url(&base_url)
            } else {
                route.path()
            }
        })
        .collect();

    if args.json {
        serde_json::to_string_pretty(&entries).context("Failed to serialize routes")
    } else {
        Ok(entries.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    const TWO_FORMATS: &str = "[site]\nurl = \"https://x.app/\"\n[build]\nformats = [\"png\", \"jpg\"]\n";

    #[test]
    fn test_paths() {
        let config = test_parse_config(TWO_FORMATS);
        let out = list_routes(&config, &RoutesArgs::default()).unwrap();
        assert_eq!(out, "/\n/png-to-jpg\n/jpg-to-png");
    }

    #[test]
    fn test_urls_as_json() {
        let config = test_parse_config(TWO_FORMATS);
        let args = RoutesArgs {
            json: true,
            urls: true,
            site_url: None,
        };
        let out: Vec<String> = serde_json::from_str(&list_routes(&config, &args).unwrap()).unwrap();
        assert_eq!(
            out,
            [
                "https://x.app/",
                "https://x.app/png-to-jpg/",
                "https://x.app/jpg-to-png/"
            ]
        );
    }

    #[test]
    fn test_standard_registry_count() {
        let config = test_parse_config("");
        let out = list_routes(&config, &RoutesArgs::default()).unwrap();
        assert_eq!(out.lines().count(), 91);
    }
}
