#![deny(missing_docs)]

//! # Update Command
//!
//! Rebuilds the main document's `paths` from every path file under the paths directory.
//! If the configured main document is missing, asks where it is.

use crate::prompt::{prompt_until_valid, InputProvider};
use oas_paths_core::document::render_document;
use oas_paths_core::{AppResult, FsDocumentStore, SpecSynchronizer, SyncReport};
use std::path::{Path, PathBuf};

/// Arguments for the update command.
#[derive(clap::Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Path to the main OpenAPI document.
    #[clap(long, env = "OAS_PATHS_SPEC", default_value = "openapi.yaml")]
    pub spec: PathBuf,

    /// Directory holding the path files. Defaults to `paths/` next to the main document.
    #[clap(long, env = "OAS_PATHS_DIR")]
    pub paths_dir: Option<PathBuf>,

    /// Print the rebuilt document instead of writing it.
    #[clap(long)]
    pub dry_run: bool,
}

/// Executes the update command.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `input` - Used only when the main document cannot be found.
pub fn execute(args: &UpdateArgs, input: &mut impl InputProvider) -> AppResult<SyncReport> {
    let spec = locate_spec(&args.spec, input)?;
    let paths_dir = args
        .paths_dir
        .clone()
        .unwrap_or_else(|| default_paths_dir(&spec));

    tracing::info!(
        spec = %spec.display(),
        paths_dir = %paths_dir.display(),
        dry_run = args.dry_run,
        "updating path references"
    );

    let sync = SpecSynchronizer::new(&FsDocumentStore, &spec);
    if args.dry_run {
        let (doc, report) = sync.preview(&paths_dir)?;
        print!("{}", render_document(&spec, &doc)?);
        return Ok(report);
    }

    sync.run(&paths_dir)
}

/// Returns `configured` if it exists, otherwise prompts until an existing file is named.
fn locate_spec(configured: &Path, input: &mut impl InputProvider) -> AppResult<PathBuf> {
    if configured.is_file() {
        return Ok(configured.to_path_buf());
    }

    tracing::warn!(spec = %configured.display(), "main OpenAPI document not found");
    prompt_until_valid(input, "Path to the main OpenAPI document", |answer| {
        let candidate = PathBuf::from(answer);
        if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(format!("no file at '{}'", answer))
        }
    })
}

fn default_paths_dir(spec: &Path) -> PathBuf {
    match spec.parent() {
        Some(parent) => parent.join("paths"),
        None => PathBuf::from("paths"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::ScriptedInput;
    use oas_paths_core::AppError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_update_uses_default_paths_dir() {
        let dir = tempdir().unwrap();
        let spec = dir.path().join("openapi.yaml");
        fs::write(&spec, "paths: {}\n").unwrap();
        fs::create_dir_all(dir.path().join("paths/users")).unwrap();
        fs::write(
            dir.path().join("paths/users/get-users.yaml"),
            "paths:\n  /users:\n    get: {}\n",
        )
        .unwrap();

        let args = UpdateArgs {
            spec: spec.clone(),
            paths_dir: None,
            dry_run: false,
        };
        let report = execute(&args, &mut ScriptedInput::default()).unwrap();

        assert_eq!(report.references_written, 1);
        assert!(fs::read_to_string(&spec)
            .unwrap()
            .contains("./paths/users/get-users.yaml#/paths/~1users/get"));
    }

    #[test]
    fn test_update_prompts_for_missing_spec() {
        let dir = tempdir().unwrap();
        let spec = dir.path().join("api/openapi.yaml");
        fs::create_dir_all(dir.path().join("api/paths")).unwrap();
        fs::write(&spec, "paths: {}\n").unwrap();

        let args = UpdateArgs {
            spec: dir.path().join("openapi.yaml"),
            paths_dir: None,
            dry_run: false,
        };
        let wrong = dir.path().join("nope.yaml");
        let mut input = ScriptedInput::new(&[
            wrong.to_str().unwrap(),
            spec.to_str().unwrap(),
        ]);

        let report = execute(&args, &mut input).unwrap();
        assert_eq!(report, SyncReport::default());
        assert_eq!(input.prompts.len(), 2);
    }

    #[test]
    fn test_update_missing_paths_dir_fails() {
        let dir = tempdir().unwrap();
        let spec = dir.path().join("openapi.yaml");
        fs::write(&spec, "paths:\n  /old: {}\n").unwrap();

        let args = UpdateArgs {
            spec: spec.clone(),
            paths_dir: None,
            dry_run: false,
        };
        let err = execute(&args, &mut ScriptedInput::default()).unwrap_err();

        assert!(matches!(err, AppError::MissingResource(_)));
        assert_eq!(fs::read_to_string(&spec).unwrap(), "paths: {}\n");
    }

    #[test]
    fn test_dry_run_leaves_spec_alone() {
        let dir = tempdir().unwrap();
        let spec = dir.path().join("openapi.yaml");
        fs::write(&spec, "paths:\n  /old: {}\n").unwrap();
        fs::create_dir_all(dir.path().join("paths")).unwrap();
        fs::write(dir.path().join("paths/a.yaml"), "paths:\n  /a:\n    get: {}\n").unwrap();

        let args = UpdateArgs {
            spec: spec.clone(),
            paths_dir: None,
            dry_run: true,
        };
        let report = execute(&args, &mut ScriptedInput::default()).unwrap();

        assert_eq!(report.references_written, 1);
        assert_eq!(fs::read_to_string(&spec).unwrap(), "paths:\n  /old: {}\n");
    }
}
