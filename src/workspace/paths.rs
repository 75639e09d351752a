use crate::error::{Result, WorkspaceError};
use crate::storage::META_DIR;

/// Normalize a caller-supplied path into `a/b/c` form relative to the
/// workspace root. Rejects empty, absolute and `..`-bearing paths, and
/// anything inside the workspace's own metadata directory.
pub fn normalize(raw: &str) -> Result<String> {
    let unified = raw.trim().replace('\\', "/");
    let invalid = || WorkspaceError::InvalidPath(raw.to_string());

    if unified.starts_with('/') || has_drive_prefix(&unified) {
        return Err(invalid());
    }

    let mut parts = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(invalid()),
            s => parts.push(s),
        }
    }

    if parts.is_empty() || parts[0] == META_DIR {
        return Err(invalid());
    }
    Ok(parts.join("/"))
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
