#![deny(missing_docs)]

//! # Spec Synchronizer
//!
//! Rebuilds the main document's `paths` as `$ref`s into per-feature path files.
//!
//! The run is two-phase and not atomic:
//! 1. **Clear**: `paths` is replaced with an empty mapping and the main document is saved.
//! 2. **Rebuild**: every discovered path file is linked in, then the main document is saved once.
//!
//! A reader that loads the main document between the two writes sees an empty `paths`.

use crate::collector::walk;
use crate::document::{Document, DocumentStore};
use crate::error::{AppError, AppResult};
use crate::method::HttpMethod;
use crate::pointer::{build_ref, relative_reference};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Counters gathered during a rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Path files found under the path-files directory.
    pub files_discovered: usize,
    /// Files without a `paths` mapping.
    pub files_skipped: usize,
    /// `$ref` entries set (overwrites included).
    pub references_written: usize,
}

/// Drives the clear/rebuild cycle for one main document.
pub struct SpecSynchronizer<'a, S: DocumentStore> {
    store: &'a S,
    main_spec: &'a Path,
}

impl<'a, S: DocumentStore> SpecSynchronizer<'a, S> {
    /// Creates a synchronizer for the main document at `main_spec`.
    pub fn new(store: &'a S, main_spec: &'a Path) -> Self {
        Self { store, main_spec }
    }

    /// Runs both phases against the files under `paths_dir`.
    ///
    /// The directory is checked after the Clear phase, so a missing directory
    /// leaves the main document with an empty `paths`.
    pub fn run(&self, paths_dir: &Path) -> AppResult<SyncReport> {
        self.clear()?;

        if !paths_dir.is_dir() {
            return Err(AppError::MissingResource(format!(
                "Path files directory not found: {}",
                paths_dir.display()
            )));
        }

        let files = walk(paths_dir)?;
        if files.is_empty() {
            tracing::info!(dir = %paths_dir.display(), "no path files found, paths left empty");
            return Ok(SyncReport::default());
        }

        self.rebuild(&files)
    }

    /// Phase 1: empties `paths` and saves the main document.
    pub fn clear(&self) -> AppResult<()> {
        let mut doc = self.store.read(self.main_spec)?;
        reset_paths(&mut doc, self.main_spec)?;
        self.store.write(self.main_spec, &doc)?;
        tracing::debug!(spec = %self.main_spec.display(), "cleared paths");
        Ok(())
    }

    /// Phase 2: links every file into `paths` and saves the main document once.
    pub fn rebuild(&self, files: &[PathBuf]) -> AppResult<SyncReport> {
        let mut doc = self.store.read(self.main_spec)?;
        let report = self.link_files(&mut doc, files)?;
        self.store.write(self.main_spec, &doc)?;

        tracing::info!(
            spec = %self.main_spec.display(),
            files = report.files_discovered,
            skipped = report.files_skipped,
            references = report.references_written,
            "rebuilt paths"
        );
        Ok(report)
    }

    /// Performs both phases in memory only and returns the would-be document.
    pub fn preview(&self, paths_dir: &Path) -> AppResult<(Document, SyncReport)> {
        let mut doc = self.store.read(self.main_spec)?;
        reset_paths(&mut doc, self.main_spec)?;

        if !paths_dir.is_dir() {
            return Err(AppError::MissingResource(format!(
                "Path files directory not found: {}",
                paths_dir.display()
            )));
        }

        let files = walk(paths_dir)?;
        let report = self.link_files(&mut doc, &files)?;
        Ok((doc, report))
    }

    fn link_files(&self, doc: &mut Document, files: &[PathBuf]) -> AppResult<SyncReport> {
        let base_dir = match self.main_spec.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let paths = paths_mapping(doc, self.main_spec)?;
        let mut report = SyncReport {
            files_discovered: files.len(),
            ..SyncReport::default()
        };

        for file in files {
            let fragment = self.store.read(file)?;
            let Some(fragment_paths) = fragment.get("paths").and_then(Value::as_mapping) else {
                tracing::debug!(file = %file.display(), "no paths mapping, skipping");
                report.files_skipped += 1;
                continue;
            };

            let rel = relative_reference(base_dir, file);
            for (api_path, item) in fragment_paths {
                let Some(api_path) = api_path.as_str() else {
                    tracing::warn!(file = %file.display(), "non-string path key ignored");
                    continue;
                };
                let Some(item) = item.as_mapping() else {
                    continue;
                };

                for method_key in item.iter().filter_map(|(key, _)| key.as_str()) {
                    if !is_operation_key(method_key) {
                        tracing::trace!(path = api_path, key = method_key, "skipping key");
                        continue;
                    }

                    let reference = build_ref(&rel, api_path, method_key);
                    set_reference(paths, api_path, method_key, reference);
                    report.references_written += 1;
                }
            }
        }

        Ok(report)
    }
}

/// Whether a path item key names an operation to link.
///
/// Extension (`x-`) and `$`-prefixed keys are never operations; everything else
/// must be one of the recognized HTTP methods.
pub fn is_operation_key(key: &str) -> bool {
    if key.starts_with("x-") || key.starts_with('$') {
        return false;
    }
    HttpMethod::parse(key).is_some()
}

/// Drops any existing `paths` and appends an empty one.
fn reset_paths(doc: &mut Document, origin: &Path) -> AppResult<()> {
    let root = root_mapping(doc, origin)?;
    let kept: Mapping = std::mem::take(root)
        .into_iter()
        .filter(|(key, _)| key.as_str() != Some("paths"))
        .collect();
    *root = kept;
    root.insert(Value::from("paths"), Value::Mapping(Mapping::new()));
    Ok(())
}

fn root_mapping<'d>(doc: &'d mut Document, origin: &Path) -> AppResult<&'d mut Mapping> {
    if doc.is_null() {
        *doc = Value::Mapping(Mapping::new());
    }
    doc.as_mapping_mut().ok_or_else(|| {
        AppError::Parse(
            origin.to_path_buf(),
            "document root is not a mapping".to_string(),
        )
    })
}

fn paths_mapping<'d>(doc: &'d mut Document, origin: &Path) -> AppResult<&'d mut Mapping> {
    let root = root_mapping(doc, origin)?;
    if !root.get("paths").is_some_and(Value::is_mapping) {
        root.insert(Value::from("paths"), Value::Mapping(Mapping::new()));
    }
    root.get_mut("paths")
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| AppError::General("paths mapping vanished".to_string()))
}

/// Sets `paths[api_path][method] = {$ref: reference}`; existing entries keep their position.
fn set_reference(paths: &mut Mapping, api_path: &str, method: &str, reference: String) {
    if !paths.get(api_path).is_some_and(Value::is_mapping) {
        paths.insert(Value::from(api_path), Value::Mapping(Mapping::new()));
    }

    let mut ref_object = Mapping::new();
    ref_object.insert(Value::from("$ref"), Value::from(reference));

    if let Some(item) = paths.get_mut(api_path).and_then(Value::as_mapping_mut) {
        item.insert(Value::from(method), Value::Mapping(ref_object));
    }
}
