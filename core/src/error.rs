//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors (traversal, reads).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Rejected user input. Only escapes the prompt loop when input runs out.
    #[from(ignore)]
    #[display("Invalid Input: {_0}")]
    InvalidInput(String),

    /// A required file or directory (template, main spec, path files) is absent.
    #[from(ignore)]
    #[display("Missing Resource: {_0}")]
    MissingResource(String),

    /// Malformed document content, with the offending file.
    #[from(ignore)]
    #[display("Parse Error in {}: {_1}", _0.display())]
    Parse(PathBuf, String),

    /// Filesystem write failure, with the target file.
    #[from(ignore)]
    #[display("Write Error for {}: {_1}", _0.display())]
    Write(PathBuf, String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
