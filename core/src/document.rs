#![deny(missing_docs)]

//! # Document Store
//!
//! Loading and saving of structured documents (main spec and path files).
//!
//! Documents are held as `serde_yaml::Value`, whose mappings keep insertion order,
//! so a load/modify/save cycle never reshuffles keys.

use crate::error::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// An in-memory structured document.
pub type Document = serde_yaml::Value;

/// On-disk encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl DocumentFormat {
    /// Extensions recognized as documents.
    pub const EXTENSIONS: [&'static str; 3] = ["yaml", "yml", "json"];

    /// Infers the format from a path. Unknown extensions are treated as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    /// Whether the path carries one of [`Self::EXTENSIONS`].
    pub fn is_document(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| Self::EXTENSIONS.iter().any(|k| ext.eq_ignore_ascii_case(k)))
    }
}

/// Interface for reading and writing documents.
///
/// Abstracted so the synchronizer can run against an in-memory store in tests.
pub trait DocumentStore {
    /// Loads and parses the document at `path`.
    fn read(&self, path: &Path) -> AppResult<Document>;

    /// Serializes and persists `doc` at `path`.
    fn write(&self, path: &Path, doc: &Document) -> AppResult<()>;
}

/// Standard store backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDocumentStore;

impl DocumentStore for FsDocumentStore {
    fn read(&self, path: &Path) -> AppResult<Document> {
        if !path.exists() {
            return Err(AppError::MissingResource(format!(
                "Document not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        parse_document(path, &content)
    }

    fn write(&self, path: &Path, doc: &Document) -> AppResult<()> {
        let content = render_document(path, doc)?;
        fs::write(path, content).map_err(|e| AppError::Write(path.to_path_buf(), e.to_string()))
    }
}

/// Parses document text according to the format implied by `path`.
///
/// Empty text yields an empty mapping.
pub fn parse_document(path: &Path, content: &str) -> AppResult<Document> {
    if content.trim().is_empty() {
        return Ok(Document::Mapping(serde_yaml::Mapping::new()));
    }

    match DocumentFormat::from_path(path) {
        DocumentFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| AppError::Parse(path.to_path_buf(), e.to_string())),
        DocumentFormat::Json => serde_json::from_str(content)
            .map_err(|e| AppError::Parse(path.to_path_buf(), e.to_string())),
    }
}

/// Serializes a document according to the format implied by `path`.
pub fn render_document(path: &Path, doc: &Document) -> AppResult<String> {
    match DocumentFormat::from_path(path) {
        DocumentFormat::Yaml => serde_yaml::to_string(doc)
            .map_err(|e| AppError::Write(path.to_path_buf(), e.to_string())),
        DocumentFormat::Json => serde_json::to_string_pretty(doc)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| AppError::Write(path.to_path_buf(), e.to_string())),
    }
}

/// Reads `info.version` if present and a string.
pub fn api_version(doc: &Document) -> Option<&str> {
    doc.get("info")?.get("version")?.as_str()
}
