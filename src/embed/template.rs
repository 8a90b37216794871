//! Template and asset types for typed variable injection.

use std::marker::PhantomData;

/// A set of values substituted into a template's placeholders.
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Kind of a client bundle file, decides its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    JavaScript,
    Css,
}

impl AssetKind {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::Css => "css",
        }
    }
}

/// Client bundle file written to the output under a content-hashed name.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset<V> {
    kind: AssetKind,
    stem: &'static str,
    template: Template<V>,
}

/// Rendered asset ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAsset {
    /// `{stem}-{hash}.{ext}`
    pub filename: String,
    pub content: String,
}

impl<V> EmbeddedAsset<V> {
    pub const fn new(kind: AssetKind, stem: &'static str, content: &'static str) -> Self {
        Self {
            kind,
            stem,
            template: Template::new(content),
        }
    }
}

impl<V: TemplateVars> EmbeddedAsset<V> {
    /// Substitute variables and derive the hashed filename from the result,
    /// so any change in injected values yields a new URL.
    pub fn render(&self, vars: &V) -> RenderedAsset {
        let content = self.template.render(vars);
        let hash = blake3::hash(content.as_bytes());
        let short = &hex::encode(hash.as_bytes())[..10];
        RenderedAsset {
            filename: format!("{}-{}.{}", self.stem, short, self.kind.extension()),
            content,
        }
    }
}

/// Variables for assets without placeholders.
pub struct NoVars;

impl TemplateVars for NoVars {
    fn apply(&self, content: &str) -> String {
        content.to_string()
    }
}
