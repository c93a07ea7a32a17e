//! Application layer errors.
//!
//! These errors represent failures in orchestration, not schema shape.
//! Schema shape errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No schema document could be discovered at the input location.
    #[error("No schema documents found at {path}")]
    NoSchemaInput { path: PathBuf },

    /// A schema document exists but could not be parsed.
    #[error("Failed to parse schema document {path}: {reason}")]
    SchemaParse { path: PathBuf, reason: String },

    /// The intermediate table file could not be encoded or decoded.
    #[error("Table definition file error: {reason}")]
    TableCodec { reason: String },

    /// Unit rendering failed.
    #[error("Rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The metadata document could not be serialized.
    #[error("Failed to serialize metadata: {reason}")]
    MetadataSerialization { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NoSchemaInput { path } => vec![
                format!("Nothing to generate from: {}", path.display()),
                "Place *.yaml, *.yml or *.json OpenAPI documents there".into(),
                "Or point at a file or directory with --input".into(),
            ],
            Self::SchemaParse { path, .. } => vec![
                format!("Check the syntax of {}", path.display()),
                "The document must be a YAML or JSON mapping at the top level".into(),
            ],
            Self::TableCodec { .. } => vec![
                "Regenerate the table definitions with --target csv".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoSchemaInput { .. } => ErrorCategory::NotFound,
            Self::SchemaParse { .. } | Self::TableCodec { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::RenderingFailed { .. } | Self::MetadataSerialization { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
