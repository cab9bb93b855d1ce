#![deny(missing_docs)]

//! # OAS Paths Core
//!
//! Keeps an OpenAPI document's `paths` section in sync with a tree of small
//! path-definition files, and renders new path files from a template.

/// Shared error types.
pub mod error;

/// HTTP method tokens.
pub mod method;

/// Path expression parsing.
pub mod path_expr;

/// JSON Pointer and `$ref` construction.
pub mod pointer;

/// Document loading and saving.
pub mod document;

/// Path file discovery.
pub mod collector;

/// Clear/rebuild of the main document's `paths`.
pub mod sync;

/// Path stub rendering.
pub mod stub;

pub use collector::walk;
pub use document::{api_version, Document, DocumentFormat, DocumentStore, FsDocumentStore};
pub use error::{AppError, AppResult};
pub use method::HttpMethod;
pub use path_expr::{validate_method, validate_path, PathExpression};
pub use pointer::{build_ref, encode_pointer_segment, relative_reference};
pub use stub::{load_template, output_location, write_stub, StubRequest};
pub use sync::{SpecSynchronizer, SyncReport};
