#![deny(missing_docs)]

//! # OAS Docs CLI
//!
//! Command line front-end for the documentation lookups.
//!
//! Supported Commands:
//! - `operation`, `method`, `path`, `parameters`, `code-samples`: per-operation lookups.
//! - `base-url`, `schemas`: document-level lookups.
//! - `list`: every operation with its method and path.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::CliResult;

mod error;
mod load;
mod query;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Query an OpenAPI 3.x document for documentation pages")]
struct Cli {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, env = "OAS_DOCS_SPEC")]
    spec: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format.
    #[clap(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: query::Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(cli: &Cli) {
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Logs go to stderr so stdout stays valid JSON.
    match cli.log_format {
        LogFormat::Text => fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let ctx = load::load_spec(&cli.spec)?;
    let answer = query::execute(&cli.command, &ctx)?;
    println!("{}", serde_json::to_string_pretty(&answer)?);

    Ok(())
}
