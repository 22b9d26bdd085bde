#![deny(missing_docs)]

//! # Spec Context
//!
//! Caller-owned holder of the current specification, in both its raw and
//! resolved forms, plus the lookups documentation pages use.
//!
//! Loading a specification:
//! 1. checks the `openapi` version,
//! 2. backfills missing `operationId`s when `paths` is present,
//! 3. dereferences the document through the configured [`Dereferencer`],
//! 4. validates the result into an [`OpenApiDocument`],
//! 5. swaps the stored [`LoadedSpec`] in one assignment.
//!
//! Any failure before step 5 leaves the previous specification in place.

use crate::error::{AppError, AppResult};
use crate::oas::dereference::{Dereferenced, Dereferencer, LocalDereferencer};
use crate::oas::methods::HttpMethod;
use crate::oas::models::{CodeSample, OpenApiDocument, Operation, Parameter};
use crate::oas::naming::backfill_operation_ids;
use crate::oas::version::check_openapi_version;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;
use utoipa::openapi::RefOr;

/// One loaded specification: the raw input and its resolved, typed form.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSpec {
    raw: Value,
    resolved: OpenApiDocument,
}

impl Default for LoadedSpec {
    fn default() -> Self {
        Self {
            raw: Value::Object(Map::new()),
            resolved: OpenApiDocument::default(),
        }
    }
}

impl LoadedSpec {
    /// The document as supplied, after `operationId` backfilling.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The dereferenced, validated document all lookups read from.
    pub fn resolved(&self) -> &OpenApiDocument {
        &self.resolved
    }
}

/// Holds the current specification and answers lookups against it.
///
/// Before any specification is set, lookups behave as on an empty document.
#[derive(Debug, Clone, Default)]
pub struct SpecContext<D = LocalDereferencer> {
    dereferencer: D,
    current: Arc<LoadedSpec>,
}

impl SpecContext {
    /// Creates an empty context using [`LocalDereferencer`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context and loads `doc` into it.
    pub fn from_specification(doc: Value) -> AppResult<Self> {
        let mut ctx = Self::new();
        ctx.set_specification(doc)?;
        Ok(ctx)
    }
}

impl<D: Dereferencer> SpecContext<D> {
    /// Creates an empty context resolving references through `dereferencer`.
    pub fn with_dereferencer(dereferencer: D) -> Self {
        Self {
            dereferencer,
            current: Arc::default(),
        }
    }

    /// Replaces the current specification.
    ///
    /// # Errors
    ///
    /// * [`AppError::UnsupportedVersion`] when `openapi` is present but not `3.x`.
    /// * [`AppError::InvalidDocument`] when the root is not a mapping or the
    ///   resolved document does not fit the OpenAPI model.
    /// * Whatever the dereferencer reports.
    ///
    /// A missing `openapi` field only logs a warning.
    pub fn set_specification(&mut self, mut doc: Value) -> AppResult<()> {
        if !doc.is_object() {
            return Err(AppError::InvalidDocument(
                "the document root must be a mapping".into(),
            ));
        }

        let version = check_openapi_version(&doc)?;

        if doc.get("paths").is_some_and(Value::is_object) {
            let assigned = backfill_operation_ids(&mut doc);
            if assigned > 0 {
                debug!(assigned, "backfilled missing operation identifiers");
            }
        }

        let Dereferenced { schema } = self.dereferencer.dereference(&doc)?;
        let resolved: OpenApiDocument = serde_json::from_value(schema)
            .map_err(|e| AppError::InvalidDocument(e.to_string()))?;

        debug!(
            version = version.as_deref().unwrap_or("unspecified"),
            paths = resolved.paths.items.len(),
            "specification loaded"
        );
        self.current = Arc::new(LoadedSpec { raw: doc, resolved });
        Ok(())
    }

    /// Parses YAML or JSON text and replaces the current specification with it.
    pub fn set_specification_str(&mut self, content: &str) -> AppResult<()> {
        let doc: Value = serde_yaml::from_str(content)
            .map_err(|e| AppError::General(format!("Failed to parse OpenAPI document: {}", e)))?;
        self.set_specification(doc)
    }

    /// A handle on the current specification that survives later replacements.
    pub fn snapshot(&self) -> Arc<LoadedSpec> {
        Arc::clone(&self.current)
    }

    /// The raw form of the current specification.
    pub fn raw_spec(&self) -> &Value {
        self.current.raw()
    }

    /// The resolved form of the current specification.
    pub fn resolved(&self) -> &OpenApiDocument {
        self.current.resolved()
    }

    /// See [`OpenApiDocument::find_operation`].
    pub fn find_operation(&self, operation_id: &str) -> Option<&Operation> {
        self.resolved().find_operation(operation_id)
    }

    /// See [`OpenApiDocument::find_operation_method`].
    pub fn find_operation_method(&self, operation_id: &str) -> Option<HttpMethod> {
        self.resolved().find_operation_method(operation_id)
    }

    /// See [`OpenApiDocument::find_operation_path`].
    pub fn find_operation_path(&self, operation_id: &str) -> Option<&str> {
        self.resolved().find_operation_path(operation_id)
    }

    /// See [`OpenApiDocument::find_operation_parameters`].
    pub fn find_operation_parameters(&self, operation_id: &str) -> &[RefOr<Parameter>] {
        self.resolved().find_operation_parameters(operation_id)
    }

    /// See [`OpenApiDocument::base_url`].
    pub fn base_url(&self) -> &str {
        self.resolved().base_url()
    }

    /// See [`OpenApiDocument::schemas`].
    pub fn schemas(&self) -> &IndexMap<String, Value> {
        self.resolved().schemas()
    }

    /// See [`OpenApiDocument::find_operation_code_samples`].
    pub fn find_operation_code_samples(&self, operation_id: &str) -> &[CodeSample] {
        self.resolved().find_operation_code_samples(operation_id)
    }
}
