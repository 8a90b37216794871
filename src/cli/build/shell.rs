//! HTML shell every route is spliced into.

use crate::embed::{
    TemplateVars,
    shell::{HEAD_PLACEHOLDER, MOUNT_POINT, SHELL_HTML, ShellVars},
};
use crate::page::RenderResult;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Document template with the client bundle already linked.
#[derive(Debug, Clone)]
pub struct HtmlShell {
    html: String,
}

impl HtmlShell {
    /// Load the shell from `custom`, or use the embedded default.
    ///
    /// Asset placeholders are filled in either case. The head placeholder
    /// and the empty mount point must both be present.
    pub fn load(custom: Option<&Path>, vars: &ShellVars<'_>) -> Result<Self> {
        let (html, origin) = match custom {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read HTML shell {}", path.display()))?;
                (vars.apply(&content), path.display().to_string())
            }
            None => (SHELL_HTML.render(vars), "embedded shell".to_string()),
        };
        Self::from_html(html, &origin)
    }

    fn from_html(html: String, origin: &str) -> Result<Self> {
        for marker in [HEAD_PLACEHOLDER, MOUNT_POINT] {
            if !html.contains(marker) {
                bail!("HTML shell {origin} is missing `{marker}`");
            }
        }
        Ok(Self { html })
    }

    /// Final document for one rendered route.
    ///
    /// Head metadata replaces the head placeholder; the markup fills the
    /// mount point, followed by the bootstrap script.
    pub fn render(&self, result: &RenderResult) -> Result<String> {
        let script = result.initial_state.script_tag()?;
        let mounted = format!(r#"<div id="root">{}</div>{}"#, result.markup, script);

        Ok(self
            .html
            .replacen(HEAD_PLACEHOLDER, &result.head.to_html(), 1)
            .replacen(MOUNT_POINT, &mounted, 1))
    }
}
