//! Directory traversal.

use crate::config::CompiledFilters;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },
    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
}

/// Lists the regular files under `root`, sorted by name within each directory.
///
/// Without `recursive` only the direct children of `root` are listed.
/// Symbolic links are not followed. Entries that cannot be read are logged and
/// skipped.
///
/// # Errors
///
/// Fails only when `root` itself is missing or is not a directory.
pub fn collect_files(
    root: &Path,
    recursive: bool,
    filters: &CompiledFilters,
) -> Result<Vec<PathBuf>, ScanError> {
    let root = root
        .canonicalize()
        .map_err(|_| ScanError::MissingDirectory {
            path: root.to_path_buf(),
        })?;
    if !root.is_dir() {
        return Err(ScanError::NotADirectory { path: root });
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| filters.include_hidden() || !is_hidden_dir(entry));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = entry.path().strip_prefix(&root).unwrap_or(entry.path());
        if filters.should_include(rel_path) {
            files.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "excluded by filters");
        }
    }

    Ok(files)
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_string_lossy().starts_with('.')
}
