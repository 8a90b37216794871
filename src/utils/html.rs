//! HTML escaping for server-rendered markup.
//!
//! - `escape()` - text content
//! - `escape_attr()` - quoted attribute values
//! - `escape_script_json()` - JSON inside an inline `<script>`

use std::borrow::Cow;

/// Escape text content: `<`, `>` and `&`.
pub fn escape(s: &str) -> Cow<'_, str> {
    replace_chars(s, text_entity)
}

/// Escape an attribute value, safe in single- and double-quoted attributes.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    replace_chars(s, |c| match c {
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        c => text_entity(c),
    })
}

/// Escape serialized JSON for embedding in an inline `<script>` element.
///
/// The result is still valid JSON (and a valid JS expression) but cannot
/// close the script element, open a comment, or break a JS string literal
/// with raw line separators.
pub fn escape_script_json(json: &str) -> Cow<'_, str> {
    replace_chars(json, |c| match c {
        '<' => Some("\\u003c"),
        '>' => Some("\\u003e"),
        '&' => Some("\\u0026"),
        '\u{2028}' => Some("\\u2028"),
        '\u{2029}' => Some("\\u2029"),
        _ => None,
    })
}

fn text_entity(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        _ => None,
    }
}

/// Replace every char `entity` maps; borrows when nothing matches.
fn replace_chars(s: &str, entity: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let Some(first) = s.find(|c: char| entity(c).is_some()) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 16);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match entity(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}
