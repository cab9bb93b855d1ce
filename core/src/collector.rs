#![deny(missing_docs)]

//! # Path File Collector
//!
//! Discovers path-definition documents under a directory tree.

use crate::document::DocumentFormat;
use crate::error::{AppError, AppResult};
use crate::pointer::absolute_lexical;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists every document file under `root`, depth-first, siblings sorted by name.
///
/// A missing root yields an empty list. Symlinks are followed; a link back to one
/// of its own ancestors is skipped with a warning.
pub fn walk(root: &Path) -> AppResult<Vec<PathBuf>> {
    if !root.exists() {
        tracing::debug!(root = %root.display(), "path files root does not exist");
        return Ok(Vec::new());
    }

    let root = absolute_lexical(root);
    let mut files = Vec::new();

    let walker = WalkDir::new(&root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                tracing::warn!(
                    link = %e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    "symlink loop skipped"
                );
                continue;
            }
            Err(e) => {
                return Err(match e.into_io_error() {
                    Some(io) => AppError::Io(io),
                    None => AppError::General("Failed to walk path files".to_string()),
                })
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && DocumentFormat::is_document(path) {
            files.push(path.to_path_buf());
        }
    }

    tracing::debug!(root = %root.display(), count = files.len(), "collected path files");
    Ok(files)
}
