//! Pure path-mapping logic: any file under the static root, plus `.html` fallback.

use std::path::{Path, PathBuf};

/// True if the request path tries to climb out of the static root.
pub fn is_traversal(uri: &str) -> bool {
    uri.split('/').any(|seg| seg == ".." || seg.contains('\\'))
}

/// Given a request path, return the corresponding file under `root`,
/// or `None` if no matching file exists.
pub fn map_static_path(root: &Path, uri: &str) -> Option<PathBuf> {
    if is_traversal(uri) {
        return None;
    }

    let rel = uri.trim_start_matches('/');

    // Root → index.html
    if rel.is_empty() {
        let index = root.join("index.html");
        return index.is_file().then_some(index);
    }

    let candidate = root.join(rel);
    if candidate.is_file() {
        return Some(candidate);
    }

    let html_candidate = root.join(format!("{}.html", rel.trim_end_matches('/')));
    if html_candidate.is_file() {
        return Some(html_candidate);
    }

    None
}
