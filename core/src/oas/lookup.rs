#![deny(missing_docs)]

//! # Lookups
//!
//! Pure queries over a resolved [`OpenApiDocument`]. "Not found" is always a
//! regular answer (`None` or an empty collection), never an error.
//!
//! Operations are scanned path by path in document order, and within a path in
//! [`HttpMethod::ALL`] order. The first operation whose `operationId` matches wins.

use crate::oas::methods::HttpMethod;
use crate::oas::models::{CodeSample, OpenApiDocument, Operation, Parameter};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::OnceLock;
use utoipa::openapi::RefOr;

fn empty_schemas<'a>() -> &'a IndexMap<String, Value> {
    static EMPTY: OnceLock<IndexMap<String, Value>> = OnceLock::new();
    EMPTY.get_or_init(IndexMap::new)
}

impl OpenApiDocument {
    /// Iterates every operation as `(path template, method, operation)`.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> + '_ {
        self.paths.items.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| (path.as_str(), method, op))
        })
    }

    fn find_operation_entry(&self, operation_id: &str) -> Option<(&str, HttpMethod, &Operation)> {
        self.operations()
            .find(|(_, _, op)| op.operation_id.as_deref() == Some(operation_id))
    }

    /// Returns the operation with the given `operationId`.
    pub fn find_operation(&self, operation_id: &str) -> Option<&Operation> {
        self.find_operation_entry(operation_id).map(|(_, _, op)| op)
    }

    /// Returns the HTTP method the operation is bound to.
    pub fn find_operation_method(&self, operation_id: &str) -> Option<HttpMethod> {
        self.find_operation_entry(operation_id)
            .map(|(_, method, _)| method)
    }

    /// Returns the path template the operation lives under (e.g. `/users/{id}`).
    pub fn find_operation_path(&self, operation_id: &str) -> Option<&str> {
        self.find_operation_entry(operation_id).map(|(path, _, _)| path)
    }

    /// Returns the parameters declared on the operation itself.
    ///
    /// Path-level parameters are not merged in.
    pub fn find_operation_parameters(&self, operation_id: &str) -> &[RefOr<Parameter>] {
        self.find_operation(operation_id)
            .map(|op| op.parameters.as_slice())
            .unwrap_or_default()
    }

    /// Returns the operation's vendor code samples.
    ///
    /// See [`Operation::code_samples`] for the extension precedence.
    pub fn find_operation_code_samples(&self, operation_id: &str) -> &[CodeSample] {
        self.find_operation(operation_id)
            .map(Operation::code_samples)
            .unwrap_or_default()
    }

    /// URL of the first declared server, or `""` when none is declared.
    pub fn base_url(&self) -> &str {
        self.servers
            .first()
            .map(|server| server.url.as_str())
            .unwrap_or_default()
    }

    /// The `components.schemas` mapping, or an empty mapping.
    pub fn schemas(&self) -> &IndexMap<String, Value> {
        self.components
            .as_ref()
            .map(|components| &components.schemas)
            .unwrap_or_else(empty_schemas)
    }
}
