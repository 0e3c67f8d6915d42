//! Error types for form field operations
//!
//! Malformed user input never shows up here: it is reported through
//! [`crate::validation::ValidationResult`]. These errors cover misuse of the
//! library and failures of the collaborators around it.

use crate::fields::FieldKind;
use crate::transform::Transformation;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors that can occur while building, transforming or saving forms
#[derive(Debug, Error)]
pub enum FormError {
    /// No transformation function registered for this field kind
    #[error("no {transformation} transformation registered for {kind} fields")]
    UnsupportedTransformation {
        transformation: Transformation,
        kind: FieldKind,
    },

    /// A field with this name already exists in the form
    #[error("duplicate field name: {name}")]
    DuplicateField { name: String },

    /// Field not found by name
    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    /// A configuration value is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The record collaborator rejected an operation
    #[error("record error on '{field}': {message}")]
    Record { field: String, message: String },

    /// Configuration file not found at an explicit path
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
