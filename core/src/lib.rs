#![deny(missing_docs)]

//! # OAS Docs Core
//!
//! Read-only accessors over a dereferenced OpenAPI 3.x document, meant to back
//! documentation pages: operation lookup by `operationId`, parameters, servers,
//! component schemas and vendor code samples.

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) loading, dereferencing and lookups.
pub mod oas;

pub use error::{AppError, AppResult};
pub use oas::{
    CodeSample, Components, Dereferenced, Dereferencer, HttpMethod, LoadedSpec,
    LocalDereferencer, OpenApiDocument, Operation, Parameter, ParameterIn, PathItem, Paths,
    Server, SpecContext,
};
