#![deny(missing_docs)]

//! # OAS Paths CLI
//!
//! Command Line Interface for maintaining an OpenAPI document split into path files.
//!
//! Supported Commands:
//! - `generate`: Authors a new path file from a template.
//! - `update`: Rebuilds the main document's `paths` as `$ref`s into the path files.

use clap::{ArgAction, Parser, Subcommand};
use oas_paths_core::AppResult;
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::prompt::StdinProvider;

mod generate;
mod prompt;
mod update;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI path file toolkit")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv). `RUST_LOG` takes precedence.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new path definition file.
    Generate(generate::GenerateArgs),
    /// Rebuild `paths` references in the main OpenAPI document.
    Update(update::UpdateArgs),
}

fn init_tracing(verbose: u8) {
    let filter = match env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,oas_paths=info,oas_paths_core=info".to_string(),
            2 => "info,oas_paths=debug,oas_paths_core=debug".to_string(),
            _ => "debug,oas_paths=trace,oas_paths_core=trace".to_string(),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: &Cli) -> AppResult<()> {
    let mut input = StdinProvider::open();

    let result = match &cli.command {
        Commands::Generate(args) => {
            let cwd = env::current_dir()?;
            generate::execute(args, &mut input, &cwd)
                .map(|target| println!("Created {}", target.display()))
        }
        Commands::Update(args) => update::execute(args, &mut input).map(|report| {
            println!(
                "Linked {} operation(s) from {} file(s)",
                report.references_written, report.files_discovered
            )
        }),
    };

    input.close();
    result
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_flags() {
        let cli = Cli::try_parse_from([
            "oas-paths",
            "-vv",
            "update",
            "--spec",
            "api/openapi.json",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.spec, std::path::PathBuf::from("api/openapi.json"));
                assert!(args.dry_run);
                assert!(args.paths_dir.is_none());
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "oas-paths",
            "generate",
            "--method",
            "get",
            "--path",
            "/users/{id}",
            "--force",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.method.as_deref(), Some("get"));
                assert_eq!(args.path.as_deref(), Some("/users/{id}"));
                assert!(args.force);
                assert!(args.title.is_none());
            }
            other => panic!("expected generate, got {:?}", other),
        }
    }
}
