// ============================================================================
// domain/error.rs - SCHEMA SHAPE ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// Most of these are raised for a single schema item and end up as a logged
/// warning while the walker moves on to the next item.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Document structure
    // ========================================================================
    #[error("Schema document '{api_name}' is not a mapping at the top level")]
    DocumentNotAMapping { api_name: String },

    #[error("Schema '{name}' is malformed: {reason}")]
    MalformedSchema { name: String, reason: String },

    #[error("Operation {method} {path} is malformed: {reason}")]
    MalformedOperation {
        method: String,
        path: String,
        reason: String,
    },

    #[error("Parameter of {operation} is malformed: {reason}")]
    MalformedParameter { operation: String, reason: String },

    #[error("Unsupported $ref in {context}: {reference}")]
    UnsupportedReference { context: String, reference: String },

    // ========================================================================
    // Value parsing
    // ========================================================================
    #[error("Invalid {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    #[error("Table row {row} is malformed: {reason}")]
    MalformedTableRow { row: usize, reason: String },

    // ========================================================================
    // Output layout
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DocumentNotAMapping { api_name } => vec![
                format!("The document for '{}' must start with openapi/components/paths keys", api_name),
            ],
            Self::InvalidValue { kind, .. } => match *kind {
                "target" => vec![
                    "Valid targets: all, csv, ddl, server, client, enums".into(),
                ],
                "http method" => vec!["Valid methods: get, post, put, patch, delete".into()],
                _ => vec![format!("Check the {} value", kind)],
            },
            Self::MalformedTableRow { .. } => vec![
                "Regenerate the table definitions with --target csv".into(),
            ],
            _ => vec!["Fix the schema item named above".into()],
        }
    }

    /// Error category for CLI display styling.
    ///
    /// Every domain error describes input that exists but has the wrong
    /// shape.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_target_lists_targets() {
        let err = DomainError::InvalidValue {
            kind: "target",
            value: "java".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("enums")));
        assert_eq!(err.to_string(), "Invalid target: 'java'");
    }
}
