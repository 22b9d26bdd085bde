#![deny(missing_docs)]

//! # Version Gate
//!
//! Checks the root `openapi` field before a document is accepted.

use crate::error::{AppError, AppResult};
use serde_json::Value;
use tracing::warn;

/// Prefix every accepted `openapi` version carries.
pub const SUPPORTED_MAJOR_PREFIX: &str = "3.";

/// Validates the `openapi` field of a raw document.
///
/// - Missing, `null` or empty: logs a warning and returns `Ok(None)`.
/// - A string (or YAML number) starting with `3.`: returns it.
/// - Anything else: [`AppError::UnsupportedVersion`].
pub fn check_openapi_version(doc: &Value) -> AppResult<Option<String>> {
    let version = match doc.get("openapi") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => return Err(AppError::UnsupportedVersion(other.to_string())),
    };

    let Some(version) = version else {
        match doc.get("swagger").and_then(Value::as_str) {
            Some(swagger) => warn!(
                swagger,
                "Invalid OpenAPI spec, missing `openapi` field (Swagger documents are not supported)"
            ),
            None => warn!("Invalid OpenAPI spec, missing `openapi` field, no version specified"),
        }
        return Ok(None);
    };

    if !version.starts_with(SUPPORTED_MAJOR_PREFIX) {
        return Err(AppError::UnsupportedVersion(version));
    }

    Ok(Some(version))
}
