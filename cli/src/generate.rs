#![deny(missing_docs)]

//! # Generate Command
//!
//! Authors one new path-definition file.
//!
//! 1. Loads the template (built-in unless `--template` is given).
//! 2. Reads `info.version` from the main document.
//! 3. Collects method, path, title, domain and author from flags, prompting for any that are missing.
//! 4. Renders the stub and writes it to `<spec dir>/paths/<domain>/<method>-<slug>.yaml`.

use crate::prompt::{non_empty, prompt_until_valid, InputProvider};
use oas_paths_core::stub::DEFAULT_API_VERSION;
use oas_paths_core::{
    api_version, load_template, output_location, validate_method, validate_path, write_stub,
    AppError, AppResult, DocumentStore, FsDocumentStore, HttpMethod, PathExpression, StubRequest,
};
use std::path::{Path, PathBuf};

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the main OpenAPI document.
    #[clap(long, env = "OAS_PATHS_SPEC", default_value = "openapi.yaml")]
    pub spec: PathBuf,

    /// Template file with `{{NAME}}` placeholders. Uses the built-in template when omitted.
    #[clap(long, env = "OAS_PATHS_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// HTTP method (get, post, put, patch, delete, head, options, trace, connect).
    #[clap(long)]
    pub method: Option<String>,

    /// API path, e.g. `/users/{id}?expand`.
    #[clap(long)]
    pub path: Option<String>,

    /// Operation summary.
    #[clap(long)]
    pub title: Option<String>,

    /// Domain (tag and sub-directory of `paths/`).
    #[clap(long)]
    pub domain: Option<String>,

    /// Author recorded in the stub.
    #[clap(long, env = "OAS_PATHS_AUTHOR")]
    pub author: Option<String>,

    /// Overwrite the target file if it already exists.
    #[clap(long)]
    pub force: bool,
}

/// Executes the generate command and returns the written file.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `input` - Source for values not given as flags.
/// * `cwd` - Working directory; bounds the part of the output path that gets normalized.
pub fn execute(args: &GenerateArgs, input: &mut impl InputProvider, cwd: &Path) -> AppResult<PathBuf> {
    let template = load_template(args.template.as_deref())?;

    if !args.spec.is_file() {
        return Err(AppError::MissingResource(format!(
            "OpenAPI file not found: {}",
            args.spec.display()
        )));
    }
    let main_doc = FsDocumentStore.read(&args.spec)?;
    let version = api_version(&main_doc)
        .unwrap_or(DEFAULT_API_VERSION)
        .to_string();

    let request = collect_request(args, input, version)?;
    let content = request.render(&template)?;
    let target = output_location(&args.spec, &request, cwd);

    write_stub(&target, &content, args.force)?;
    tracing::info!(
        file = %target.display(),
        method = %request.method,
        path = %request.path.normalized,
        "generated path stub"
    );

    Ok(target)
}

fn collect_request(
    args: &GenerateArgs,
    input: &mut impl InputProvider,
    api_version: String,
) -> AppResult<StubRequest> {
    let method: HttpMethod = value_or_prompt(
        args.method.as_deref(),
        input,
        "HTTP method",
        validate_method,
    )?;
    let raw_path = value_or_prompt(args.path.as_deref(), input, "API path", |s| {
        validate_path(s).map(|_| s.to_string())
    })?;
    let title = value_or_prompt(args.title.as_deref(), input, "Title", non_empty)?;
    let domain = value_or_prompt(args.domain.as_deref(), input, "Domain", non_empty)?;
    let author = value_or_prompt(args.author.as_deref(), input, "Author", non_empty)?;

    Ok(StubRequest {
        method,
        path: PathExpression::parse(&raw_path),
        title,
        tag: domain,
        author,
        api_version,
    })
}

/// Uses the flag value when present (rejecting it if invalid), otherwise prompts.
fn value_or_prompt<T, F>(
    flag: Option<&str>,
    input: &mut impl InputProvider,
    prompt: &str,
    validate: F,
) -> AppResult<T>
where
    F: Fn(&str) -> Result<T, String>,
{
    match flag {
        Some(value) => validate(value.trim())
            .map_err(|reason| AppError::InvalidInput(format!("{}: {}", prompt, reason))),
        None => prompt_until_valid(input, prompt, validate),
    }
}
