//! Page component markup.
//!
//! Turns a [`PageState`] into the HTML placed inside the shell's mount
//! point. The browser script updates the same elements in place, so ids and
//! classes here are part of the hydration contract.

use super::state::{PageError, PageState};
use crate::core::{FormatPair, FormatRegistry, SupportedFormat};
use crate::embed::page::{APP_HTML, PageVars};
use crate::utils::html::{escape, escape_attr};

/// Render the page body for `state`.
pub fn render_page(
    state: &PageState,
    pair: Option<FormatPair>,
    registry: &FormatRegistry,
    site_title: &str,
) -> String {
    let headline = headline(pair);
    let badge = match pair {
        Some(pair) => format!("{} → {}", pair.source.label(), pair.target.label()),
        None => "Available for Images".to_string(),
    };
    let upload_body = upload_body(state);
    let options = options(registry, state.format());
    let message = message(state.error());
    let selected = state.format();
    let selected_label = selected.label();

    APP_HTML.render(&PageVars {
        site_title: &escape(site_title),
        headline: &headline,
        badge: &escape(&badge),
        upload_class: if state.file().is_some() { " has-file" } else { "" },
        upload_body: &upload_body,
        selected_icon: selected.icon(),
        selected_label: &selected_label,
        selected_token: selected.token(),
        dropdown_open: state.dropdown_open(),
        options: &options,
        converter_state: state.converter().as_str(),
        busy: state.is_busy(),
        cta: if state.is_busy() {
            "Converting…"
        } else {
            "Start Converting <span>🚀</span>"
        },
        message: &message,
    })
}

fn headline(pair: Option<FormatPair>) -> String {
    match pair {
        Some(pair) => format!(
            r#"CONVERT <span class="highlight">{}</span> TO <span class="highlight">{}</span>"#,
            pair.source.label(),
            pair.target.label()
        ),
        None => r#"TRANSFORM YOUR <span class="highlight">IMAGES</span>"#.to_string(),
    }
}

fn upload_body(state: &PageState) -> String {
    match state.file() {
        Some(file) => format!(
            concat!(
                r#"<div class="file-preview">"#,
                r#"<div class="icon-wrapper">📄</div>"#,
                r#"<div class="file-info"><span class="file-name">{}</span><span class="file-size">{}</span></div>"#,
                r#"<button type="button" class="remove-btn" aria-label="Remove file">✕</button>"#,
                r#"</div>"#
            ),
            escape(&file.name),
            file.size_label()
        ),
        None => concat!(
            r#"<label for="file-upload" class="upload-label">"#,
            r#"<div class="upload-icon">📂</div>"#,
            r#"<h3>Drag &amp; Drop or Click</h3>"#,
            r#"<p>Supports PNG, JPG, WEBP &amp; more</p>"#,
            r#"</label>"#
        )
        .to_string(),
    }
}

fn options(registry: &FormatRegistry, selected: SupportedFormat) -> String {
    registry
        .formats()
        .iter()
        .map(|&format| {
            let class = if format == selected {
                "custom-option selected"
            } else {
                "custom-option"
            };
            format!(
                r#"<button type="button" class="{class}" role="option" data-format="{}"><span class="option-icon">{}</span><span>{}</span></button>"#,
                escape_attr(format.token()),
                format.icon(),
                format.menu_name()
            )
        })
        .collect()
}

fn message(error: Option<&PageError>) -> String {
    match error {
        Some(err) => format!(
            r#"<div class="error-banner" role="alert"><span>{}</span><button type="button" class="dismiss-btn" aria-label="Dismiss">✕</button></div>"#,
            escape(&err.to_string())
        ),
        None => String::new(),
    }
}
