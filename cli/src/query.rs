#![deny(missing_docs)]

//! # Query Commands
//!
//! One subcommand per lookup. Every answer is rendered as JSON, with
//! `null`, `[]`, `{}` or `""` standing for "not found".

use crate::error::CliResult;
use clap::Subcommand;
use oas_docs_core::SpecContext;
use serde_json::{json, Value};

/// Lookups available from the command line.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Prints the resolved operation with the given operationId.
    Operation {
        /// The operationId to look up.
        id: String,
    },
    /// Prints the HTTP method of an operation.
    Method {
        /// The operationId to look up.
        id: String,
    },
    /// Prints the path template of an operation.
    Path {
        /// The operationId to look up.
        id: String,
    },
    /// Prints the parameters declared by an operation.
    Parameters {
        /// The operationId to look up.
        id: String,
    },
    /// Prints the URL of the first declared server.
    BaseUrl,
    /// Prints the `components.schemas` mapping.
    Schemas,
    /// Prints the code samples of an operation.
    CodeSamples {
        /// The operationId to look up.
        id: String,
    },
    /// Lists every operation with its method and path.
    List,
}

/// Runs `query` against `ctx` and returns the answer as JSON.
pub fn execute(query: &Query, ctx: &SpecContext) -> CliResult<Value> {
    let value = match query {
        Query::Operation { id } => serde_json::to_value(ctx.find_operation(id))?,
        Query::Method { id } => serde_json::to_value(ctx.find_operation_method(id))?,
        Query::Path { id } => serde_json::to_value(ctx.find_operation_path(id))?,
        Query::Parameters { id } => serde_json::to_value(ctx.find_operation_parameters(id))?,
        Query::BaseUrl => Value::String(ctx.base_url().to_string()),
        Query::Schemas => serde_json::to_value(ctx.schemas())?,
        Query::CodeSamples { id } => serde_json::to_value(ctx.find_operation_code_samples(id))?,
        Query::List => Value::Array(
            ctx.resolved()
                .operations()
                .map(|(path, method, op)| {
                    json!({
                        "operationId": op.operation_id,
                        "method": method,
                        "path": path,
                        "summary": op.summary,
                    })
                })
                .collect(),
        ),
    };
    Ok(value)
}
