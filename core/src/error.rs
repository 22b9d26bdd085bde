//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The document declares an `openapi` version outside the 3.x line.
    #[from(ignore)]
    #[display("Unsupported OpenAPI version '{_0}': only OpenAPI 3.x is supported")]
    UnsupportedVersion(String),

    /// The document (raw or resolved) does not have the shape of an OpenAPI document.
    #[from(ignore)]
    #[display("Invalid OpenAPI document: {_0}")]
    InvalidDocument(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
