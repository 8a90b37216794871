//! Embedded static resources for LocalMorph.
//!
//! # Module Structure
//!
//! - `template` - Template and asset types with typed variable injection
//! - `client` - Client bundle: hydration script and stylesheet (minified by build.rs)
//! - `shell` - Default HTML shell with head and mount-point placeholders
//! - `page` - Page component markup template
//!
//! # Usage
//!
//! ```ignore
//! use embed::client::{APP_JS, ClientVars};
//!
//! let js = APP_JS.render(&ClientVars::new(&registry, "/pkg/converter.js"));
//! fs::write(assets.join(&js.filename), js.content)?;
//! ```

mod template;

pub use template::{AssetKind, EmbeddedAsset, NoVars, Template, TemplateVars};

pub mod client {
    use super::{AssetKind, EmbeddedAsset, NoVars, TemplateVars};
    use crate::core::FormatRegistry;
    use serde::Serialize;

    /// One entry of the format menu as the browser script sees it.
    #[derive(Serialize)]
    struct FormatEntry {
        token: &'static str,
        label: String,
        name: String,
        icon: &'static str,
        mime: &'static str,
    }

    /// Variables for app.js.
    pub struct ClientVars {
        pub formats_json: String,
        pub converter_url: String,
        pub fallback: &'static str,
    }

    impl ClientVars {
        pub fn new(registry: &FormatRegistry, converter_url: &str) -> Self {
            let entries: Vec<_> = registry
                .formats()
                .iter()
                .map(|format| FormatEntry {
                    token: format.token(),
                    label: format.label(),
                    name: format.menu_name(),
                    icon: format.icon(),
                    mime: format.mime(),
                })
                .collect();
            Self {
                formats_json: serde_json::to_string(&entries).unwrap_or_else(|_| "[]".into()),
                converter_url: converter_url.to_string(),
                fallback: registry.fallback().token(),
            }
        }
    }

    impl TemplateVars for ClientVars {
        fn apply(&self, content: &str) -> String {
            let quote = |s: &str| serde_json::to_string(s).unwrap_or_else(|_| "\"\"".into());
            content
                .replace("__LOCALMORPH_FORMATS__", &self.formats_json)
                .replace("__LOCALMORPH_CONVERTER__", &quote(&self.converter_url))
                .replace("__LOCALMORPH_FALLBACK__", &quote(self.fallback))
        }
    }

    /// Hydration and interaction script.
    pub const APP_JS: EmbeddedAsset<ClientVars> = EmbeddedAsset::new(
        AssetKind::JavaScript,
        "app",
        include_str!(concat!(env!("OUT_DIR"), "/app.min.js")),
    );

    /// Page stylesheet.
    pub const APP_CSS: EmbeddedAsset<NoVars> = EmbeddedAsset::new(
        AssetKind::Css,
        "app",
        include_str!(concat!(env!("OUT_DIR"), "/app.min.css")),
    );
}

pub mod shell {
    use super::{Template, TemplateVars};

    /// Placeholder replaced by per-route head metadata.
    pub const HEAD_PLACEHOLDER: &str = "<!--app-head-->";

    /// Empty mount point replaced by the server-rendered page.
    pub const MOUNT_POINT: &str = r#"<div id="root"></div>"#;

    /// Variables for shell.html.
    pub struct ShellVars<'a> {
        pub stylesheet: &'a str,
        pub script: &'a str,
    }

    impl TemplateVars for ShellVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__LOCALMORPH_STYLESHEET__", self.stylesheet)
                .replace("__LOCALMORPH_SCRIPT__", self.script)
        }
    }

    /// Default document shell.
    pub const SHELL_HTML: Template<ShellVars<'static>> =
        Template::new(include_str!("client/shell.html"));
}

pub mod page {
    use super::{Template, TemplateVars};

    /// Variables for the page component markup.
    pub struct PageVars<'a> {
        pub site_title: &'a str,
        pub headline: &'a str,
        pub badge: &'a str,
        pub upload_class: &'a str,
        pub upload_body: &'a str,
        pub selected_icon: &'a str,
        pub selected_label: &'a str,
        pub selected_token: &'a str,
        pub dropdown_open: bool,
        pub options: &'a str,
        pub converter_state: &'a str,
        pub busy: bool,
        pub cta: &'a str,
        pub message: &'a str,
    }

    impl TemplateVars for PageVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__SITE_TITLE__", self.site_title)
                .replace("__HEADLINE__", self.headline)
                .replace("__BADGE__", self.badge)
                .replace("__UPLOAD_CLASS__", self.upload_class)
                .replace("__UPLOAD_BODY__", self.upload_body)
                .replace("__SELECTED_ICON__", self.selected_icon)
                .replace("__SELECTED_LABEL__", self.selected_label)
                .replace("__SELECTED_TOKEN__", self.selected_token)
                .replace(
                    "__DROPDOWN_EXPANDED__",
                    if self.dropdown_open { "true" } else { "false" },
                )
                .replace(
                    "__ARROW_CLASS__",
                    if self.dropdown_open { " rotate-180" } else { "" },
                )
                .replace(
                    "__OPTIONS_HIDDEN__",
                    if self.dropdown_open { "" } else { " hidden" },
                )
                .replace("__OPTIONS__", self.options)
                .replace("__CONVERTER_STATE__", self.converter_state)
                .replace("__BUSY__", if self.busy { " disabled" } else { "" })
                .replace("__CTA__", self.cta)
                .replace("__MESSAGE__", self.message)
        }
    }

    /// Page body rendered into the shell's mount point.
    pub const APP_HTML: Template<PageVars<'static>> =
        Template::new(include_str!("page/app.html"));
}

#[cfg(test)]
mod tests {
    use super::shell::{HEAD_PLACEHOLDER, MOUNT_POINT, SHELL_HTML, ShellVars};
    use super::*;
    use crate::core::{FormatRegistry, SupportedFormat};

    #[test]
    fn test_shell_has_placeholders() {
        let html = SHELL_HTML.render(&ShellVars {
            stylesheet: "/assets/app.css",
            script: "/assets/app.js",
        });
        assert!(html.contains(HEAD_PLACEHOLDER));
        assert!(html.contains(MOUNT_POINT));
        assert!(html.contains("/assets/app.css"));
        assert!(html.contains("/assets/app.js"));
        assert!(!html.contains("__LOCALMORPH_"));
    }

    #[test]
    fn test_client_vars_injects_registry() {
        let registry = FormatRegistry::new([SupportedFormat::Jpg, SupportedFormat::Gif]);
        let vars = client::ClientVars::new(&registry, "/pkg/c.js");
        let out = vars.apply(
            "const F = __LOCALMORPH_FORMATS__; const C = __LOCALMORPH_CONVERTER__; const D = __LOCALMORPH_FALLBACK__;",
        );
        assert!(out.contains(r#""token":"jpg""#));
        assert!(out.contains(r#""label":"GIF""#));
        assert!(out.contains(r#"const C = "/pkg/c.js""#));
        assert!(out.contains(r#"const D = "jpg""#));
    }

    #[test]
    fn test_client_bundle_renders() {
        let registry = FormatRegistry::standard();
        let js = client::APP_JS.render(&client::ClientVars::new(&registry, "/pkg/c.js"));
        assert!(js.content.contains("__LOCAL_MORPH_SSR__"));
        assert!(!js.content.contains("__LOCALMORPH_FORMATS__"));
        let css = client::APP_CSS.render(&NoVars);
        assert!(!css.content.is_empty());
    }
}
