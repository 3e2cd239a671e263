use std::path::{Path, PathBuf};

use crate::services::package::DOWNLOADS_PREFIX;

/// Maps `/downloads/<rel>` onto an existing file below `root`. Anything that
/// could step outside `root` resolves to nothing.
pub fn resolve(root: &Path, url_path: &str) -> Option<PathBuf> {
    let rel = url_path.strip_prefix(DOWNLOADS_PREFIX)?;

    let mut path = root.to_path_buf();
    for part in rel.split('/') {
        if part.is_empty() || part == "." || part == ".." || part.contains('\\') || part.contains('%') {
            return None;
        }
        path.push(part);
    }

    path.is_file().then_some(path)
}
