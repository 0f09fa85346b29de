//! Location identifier and path utilities.
//!
//! Internal code carries absolute paths; everything that crosses the
//! request boundary is a `file://` location identifier. The conversions
//! live here so the two representations are never mixed silently.

use std::path::{Path, PathBuf};

use crate::error::EngineError;

const FILE_SCHEME: &str = "file://";

/// Convert an absolute file path to its canonical location identifier.
pub fn path_to_uri(path: &Path) -> String {
    format!("{}{}", FILE_SCHEME, path.display())
}

/// Convert a location identifier back to an absolute file path.
///
/// Only the `file` scheme is accepted; anything else is a request-level
/// error, not a panic.
pub fn uri_to_path(uri: &str) -> Result<PathBuf, EngineError> {
    match uri.strip_prefix(FILE_SCHEME) {
        Some(rest) if !rest.is_empty() => Ok(PathBuf::from(rest)),
        _ => Err(EngineError::InvalidLocation(uri.to_string())),
    }
}

/// Workspace-relative unit path (with `/` separators) for an absolute
/// path under `root`. Paths outside the root are request-level errors.
pub fn rel_unit_path(root: &Path, path: &Path) -> Result<String, EngineError> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| EngineError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;
    Ok(slash_path(rel))
}

/// Render a relative path with forward slashes regardless of platform.
pub fn slash_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Workspace-relative directory of a relative unit path (`""` for units
/// directly under the root).
pub fn parent_dir(rel_path: &str) -> String {
    match rel_path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    }
}

/// Normalize a `dir:` filter operand.
///
/// A leading `./` or `/` and a trailing `/` are stripped, so `""`, `"/"`,
/// `"."` and `"./"` all mean the workspace root directory (non-recursive),
/// and `"d2/"`, `"/d2"`, `"./d2"` all mean the subdirectory `d2`.
pub fn normalize_dir_filter(raw: &str) -> String {
    let mut s = raw;
    if let Some(rest) = s.strip_prefix("./") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix('/') {
        s = rest;
    }
    if s == "." {
        s = "";
    }
    s.strip_suffix('/').unwrap_or(s).to_string()
}
