//! Request target to filesystem path resolution.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Outcome of resolving a request against the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Existing file, or a directory's `index.html`.
    File(PathBuf),
    /// Directory requested without its trailing slash.
    Redirect(String),
    /// Unknown extension-less path: the root `index.html`.
    Fallback(PathBuf),
    NotFound,
}

/// Resolve a request target under `serve_root`.
///
/// `/png-to-jpg/` serves `png-to-jpg/index.html`, `/png-to-jpg` redirects
/// there (query kept), and any other path without an extension falls back
/// to the root page so the client can decode it.
pub fn resolve(url: &str, serve_root: &Path) -> Resolved {
    let (raw_path, query) = match url.find('?') {
        Some(i) => url.split_at(i),
        None => (url, ""),
    };
    let raw_path = raw_path.split('#').next().unwrap_or(raw_path);

    let Ok(decoded) = percent_decode_str(raw_path).decode_utf8() else {
        return Resolved::NotFound;
    };
    if decoded.split(['/', '\\']).any(|segment| segment == "..") {
        return Resolved::NotFound;
    }

    let Ok(root) = serve_root.canonicalize() else {
        return Resolved::NotFound;
    };
    let clean = decoded.trim_matches('/');

    // Canonicalize so symlinks cannot point outside the root
    if let Ok(canonical) = root.join(clean).canonicalize() {
        if !canonical.starts_with(&root) {
            return Resolved::NotFound;
        }
        if canonical.is_file() {
            return Resolved::File(canonical);
        }
        let index = canonical.join("index.html");
        if canonical.is_dir() && index.is_file() {
            if !clean.is_empty() && !raw_path.ends_with('/') {
                return Resolved::Redirect(format!("{raw_path}/{query}"));
            }
            return Resolved::File(index);
        }
    }

    fallback(clean, &root)
}

fn fallback(clean: &str, root: &Path) -> Resolved {
    let index = root.join("index.html");
    if Path::new(clean).extension().is_none() && index.is_file() {
        Resolved::Fallback(index)
    } else {
        Resolved::NotFound
    }
}
