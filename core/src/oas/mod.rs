#![deny(missing_docs)]

//! # OpenAPI Module
//!
//! - **models**: Typed view over a resolved document.
//! - **methods**: HTTP verbs and their scan order.
//! - **version**: `openapi` version gate.
//! - **naming**: Backfill of missing `operationId`s.
//! - **ref_utils** / **dereference**: `$ref` resolution.
//! - **lookup**: Pure queries over the typed document.
//! - **context**: Caller-owned holder of the raw and resolved forms.

pub mod context;
pub mod dereference;
pub mod lookup;
pub mod methods;
pub mod models;
pub mod naming;
pub(crate) mod ref_utils;
pub mod version;

pub use context::{LoadedSpec, SpecContext};
pub use dereference::{Dereferenced, Dereferencer, LocalDereferencer};
pub use methods::HttpMethod;
pub use models::{
    CodeSample, Components, Info, OpenApiDocument, Operation, Parameter, ParameterIn, PathItem,
    Paths, Server, ServerVariable,
};
