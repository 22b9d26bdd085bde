#![deny(missing_docs)]

//! # Specification Loading
//!
//! Reads an OpenAPI document (YAML or JSON) from disk into a `SpecContext`.

use crate::error::CliResult;
use oas_docs_core::SpecContext;
use std::fs;
use std::path::Path;

/// Loads the document at `path` into a fresh context.
pub fn load_spec(path: &Path) -> CliResult<SpecContext> {
    tracing::debug!(?path, "loading specification");
    let content = fs::read_to_string(path)?;

    let mut ctx = SpecContext::new();
    ctx.set_specification_str(&content)?;
    Ok(ctx)
}
