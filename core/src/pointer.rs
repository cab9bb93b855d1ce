#![deny(missing_docs)]

//! # Reference Encoding
//!
//! Builds the `$ref` strings that point from the main document into path files,
//! e.g. `./paths/users/get-users-id.yaml#/paths/~1users~1{id}/get`.
//!
//! Only `/` is escaped in pointer segments; `~` is written as-is.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Escapes a value for use as a single JSON Pointer segment (`/` -> `~1`).
pub fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('/', "~1")
}

/// Computes the reference path of `to_file` as seen from `from_base_dir`.
///
/// Returns `./<relative>` with `/` separators when the file lies under the base
/// directory, and `to_file` unchanged otherwise.
pub fn relative_reference(from_base_dir: &Path, to_file: &Path) -> String {
    let base = absolute_lexical(from_base_dir);
    let target = absolute_lexical(to_file);

    match target.strip_prefix(&base) {
        Ok(rel) => {
            let parts: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            format!("./{}", parts.join("/"))
        }
        Err(_) => to_file.to_string_lossy().into_owned(),
    }
}

/// Assembles a reference string: `{rel_path}#/paths/{encoded api path}/{method}`.
pub fn build_ref(rel_path: &str, api_path: &str, method: &str) -> String {
    format!(
        "{}#/paths/{}/{}",
        rel_path,
        encode_pointer_segment(api_path),
        method
    )
}

/// Resolves a path against the current directory and folds `.`/`..` without
/// touching the filesystem.
pub(crate) fn absolute_lexical(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
