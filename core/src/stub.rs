#![deny(missing_docs)]

//! # Stub Generator
//!
//! Renders a new path-definition document from a plain-text template.
//!
//! Templates use `{{NAME}}` placeholders. Known names are replaced; unknown ones
//! are left in the output untouched.
//!
//! Supported names: `PATH`, `METHOD_LOWER`, `METHOD_UPPER`, `OP_PATH`, `TITLE`,
//! `TAG`, `API_VERSION`, `AUTHOR`, `PARAMETERS`.
//!
//! `PATH`, `TITLE`, `TAG`, `AUTHOR` and `API_VERSION` are emitted as YAML scalars:
//! plain when the text reads back unchanged, double-quoted otherwise. Templates
//! place them unquoted.

use crate::error::{AppError, AppResult};
use crate::method::HttpMethod;
use crate::path_expr::PathExpression;
use crate::pointer::absolute_lexical;
use regex::{Captures, Regex};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Template shipped with the crate, used when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/path.yaml");

/// Rendered in place of `PARAMETERS` when the path infers no parameters.
pub const EMPTY_PARAMETERS: &str = "[]";

/// Version used when the main document has no string `info.version`.
pub const DEFAULT_API_VERSION: &str = "1.0.0";

/// Everything needed to render one stub.
#[derive(Debug, Clone, PartialEq)]
pub struct StubRequest {
    /// Operation method.
    pub method: HttpMethod,
    /// Parsed path expression.
    pub path: PathExpression,
    /// Operation summary.
    pub title: String,
    /// Domain; used as the tag and as the output sub-directory.
    pub tag: String,
    /// Recorded as the stub's author.
    pub author: String,
    /// Version detected from the main document.
    pub api_version: String,
}

/// A single entry of the generated `parameters` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct ParameterSpec<'a> {
    #[serde(rename = "in")]
    location: &'static str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<bool>,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl StubRequest {
    /// Placeholder values, keyed by placeholder name.
    pub fn variables(&self) -> AppResult<Vec<(&'static str, String)>> {
        Ok(vec![
            ("PATH", yaml_scalar(&self.path.normalized)?),
            ("METHOD_LOWER", self.method.as_str().to_string()),
            ("METHOD_UPPER", self.method.as_str().to_uppercase()),
            ("OP_PATH", self.path.slug()),
            ("TITLE", yaml_scalar(&self.title)?),
            ("TAG", yaml_scalar(&self.tag)?),
            ("API_VERSION", yaml_scalar(&self.api_version)?),
            ("AUTHOR", yaml_scalar(&self.author)?),
            ("PARAMETERS", parameters_fragment(&self.path)?),
        ])
    }

    /// Renders `template` for this request.
    pub fn render(&self, template: &str) -> AppResult<String> {
        Ok(render_template(template, &self.variables()?))
    }

    /// File name of the stub: `{method}-{slug}.yaml`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.yaml", self.method.as_str(), self.path.slug())
    }
}

/// Builds the `parameters` value as a YAML flow sequence.
///
/// Path parameters come first (required), then query parameters.
pub fn parameters_fragment(path: &PathExpression) -> AppResult<String> {
    if path.path_parameters.is_empty() && path.query_parameters.is_empty() {
        return Ok(EMPTY_PARAMETERS.to_string());
    }

    let path_params = path.path_parameters.iter().map(|name| ParameterSpec {
        location: "path",
        name,
        required: Some(true),
        kind: "string",
    });
    let query_params = path.query_parameters.iter().map(|name| ParameterSpec {
        location: "query",
        name,
        required: None,
        kind: "string",
    });
    let params: Vec<ParameterSpec<'_>> = path_params.chain(query_params).collect();

    // A JSON array is a valid YAML flow sequence.
    serde_json::to_string(&params)
        .map_err(|e| AppError::General(format!("Failed to render parameters: {}", e)))
}

/// Renders free text as a YAML scalar that parses back to the same string.
///
/// Text that already reads back as itself stays plain; anything else (`: `, ` #`,
/// leading quotes, `true`, `1.0`, ...) becomes a JSON string, which YAML accepts
/// as a double-quoted scalar.
pub fn yaml_scalar(text: &str) -> AppResult<String> {
    let reads_back = matches!(
        serde_yaml::from_str::<serde_yaml::Value>(text),
        Ok(serde_yaml::Value::String(ref parsed)) if parsed == text
    );
    if reads_back && !text.contains(['\n', '\r', '"', '\'']) {
        return Ok(text.to_string());
    }

    serde_json::to_string(text)
        .map_err(|e| AppError::General(format!("Failed to quote '{}': {}", text, e)))
}

/// Substitutes `{{NAME}}` placeholders and normalizes the trailing newline.
pub fn render_template(template: &str, vars: &[(&str, String)]) -> String {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    let placeholder_re = PLACEHOLDER_RE
        .get_or_init(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("Invalid regex"));

    let rendered = placeholder_re.replace_all(template, |caps: &Captures| {
        vars.iter()
            .find(|(name, _)| *name == &caps[1])
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| caps[0].to_string())
    });

    with_single_trailing_newline(&rendered)
}

/// Returns `text` ending in exactly one `\n`.
///
/// Any run of trailing `\n` and `\r` is dropped first, so a final `\r\n` (or a
/// stray `\r`) becomes a single `\n`.
pub fn with_single_trailing_newline(text: &str) -> String {
    let mut out = text.trim_end_matches(['\n', '\r']).to_string();
    out.push('\n');
    out
}

/// Computes where the stub for `request` is written:
/// `{dir(main_spec)}/paths/{domain}/{method}-{slug}.yaml`.
///
/// Only the part of the path below `cwd` is lower-cased and has spaces turned
/// into dashes. Anything outside `cwd` is kept as given.
pub fn output_location(main_spec: &Path, request: &StubRequest, cwd: &Path) -> PathBuf {
    let spec_dir = absolute_lexical(main_spec)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let full = spec_dir
        .join("paths")
        .join(&request.tag)
        .join(request.file_name());
    let full = full.to_string_lossy();
    let cwd = cwd.to_string_lossy();

    // Plain string prefix, not a path-component match.
    match full.strip_prefix(cwd.as_ref()) {
        Some(below) if !cwd.is_empty() => {
            PathBuf::from(format!("{}{}", cwd, below.to_lowercase().replace(' ', "-")))
        }
        _ => PathBuf::from(full.to_string()),
    }
}

/// Writes a rendered stub, creating parent directories.
///
/// An existing file is only replaced when `force` is set.
pub fn write_stub(target: &Path, content: &str, force: bool) -> AppResult<()> {
    if target.exists() && !force {
        return Err(AppError::Write(
            target.to_path_buf(),
            "file already exists (use --force to overwrite)".to_string(),
        ));
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::Write(parent.to_path_buf(), e.to_string()))?;
    }

    fs::write(target, content).map_err(|e| AppError::Write(target.to_path_buf(), e.to_string()))
}

/// Loads a template file, or the built-in one when `path` is `None`.
pub fn load_template(path: Option<&Path>) -> AppResult<String> {
    let Some(path) = path else {
        return Ok(DEFAULT_TEMPLATE.to_string());
    };

    if !path.is_file() {
        return Err(AppError::MissingResource(format!(
            "Template not found: {}",
            path.display()
        )));
    }

    fs::read_to_string(path).map_err(AppError::from)
}
