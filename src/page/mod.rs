//! The converter page component.
//!
//! - `state` - explicit UI state record and its transitions
//! - `markup` - state to HTML
//! - `bootstrap` - hydration payload and initial format selection
//! - `session` - async driver: converter init, gated single-flight conversion
//!
//! [`Renderer`] is the server-render entry point the prerender driver calls
//! once per route. Rendering is pure: no I/O, same route in, same output out.

pub mod bootstrap;
pub mod markup;
pub mod session;
pub mod state;

pub use bootstrap::{BootstrapPayload, initial_format};
pub use session::Session;
pub use state::PageState;

use crate::core::{FormatPair, FormatRegistry, Route, SupportedFormat};
use crate::utils::html::{escape, escape_attr};

/// Per-route `<head>` metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub title: String,
    pub description: String,
    pub canonical: String,
}

impl Head {
    /// Markup spliced into the shell's head placeholder.
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                "<title>{}</title>\n",
                "    <meta name=\"description\" content=\"{}\">\n",
                "    <link rel=\"canonical\" href=\"{}\">"
            ),
            escape(&self.title),
            escape_attr(&self.description),
            escape_attr(&self.canonical)
        )
    }
}

/// Output of rendering one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub markup: String,
    pub head: Head,
    pub initial_state: BootstrapPayload,
}

/// Server-side renderer for every route of the site.
#[derive(Debug, Clone)]
pub struct Renderer {
    registry: FormatRegistry,
    site_title: String,
    description: String,
    base_url: String,
}

impl Renderer {
    pub fn new(
        registry: FormatRegistry,
        site_title: impl Into<String>,
        description: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let description = description.unwrap_or_else(|| default_description(&registry));
        Self {
            registry,
            site_title: site_title.into(),
            description,
            base_url: base_url.into(),
        }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Render the page for a request path.
    ///
    /// Paths that do not decode to a pair render the root page.
    #[cfg(test)]
    pub fn render_path(&self, path: &str) -> RenderResult {
        let route = crate::core::decode(&self.registry, path).map_or(Route::Root, Route::Pair);
        self.render(route)
    }

    /// Render one route: markup, head and bootstrap payload.
    pub fn render(&self, route: Route) -> RenderResult {
        let pair = route.pair();
        let initial_state = BootstrapPayload::from(pair);
        let target = initial_format(&self.registry, Some(&initial_state), &route.path());

        RenderResult {
            markup: self.render_server(target, pair.map(|p| p.source)),
            head: Head {
                title: self.title(pair),
                description: self.description.clone(),
                canonical: route.url(&self.base_url),
            },
            initial_state,
        }
    }

    /// Markup of a freshly loaded page with `initial_target` selected.
    pub fn render_server(
        &self,
        initial_target: SupportedFormat,
        initial_source: Option<SupportedFormat>,
    ) -> String {
        let pair = initial_source.and_then(|source| FormatPair::new(source, initial_target));
        let state = PageState::new(initial_target);
        markup::render_page(&state, pair, &self.registry, &self.site_title)
    }

    fn title(&self, pair: Option<FormatPair>) -> String {
        match pair {
            Some(pair) => format!(
                "Convert {} to {} | {}",
                pair.source.label(),
                pair.target.label(),
                self.site_title
            ),
            None => format!("{} | Offline image converter", self.site_title),
        }
    }
}

/// `Convert images locally between PNG, JPG, ... and FF without uploads.`
fn default_description(registry: &FormatRegistry) -> String {
    let labels: Vec<String> = registry
        .formats()
        .iter()
        .filter(|format| {
            **format != SupportedFormat::Jpeg || !registry.contains(SupportedFormat::Jpg)
        })
        .map(|format| format.label())
        .collect();
    let list = match labels.as_slice() {
        [] => "image formats".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    };
    format!("Convert images locally between {list} without uploads.")
}
