//! # Error Types
//!
//! Structured error types for cost_core. The calculators themselves never
//! fail; these errors cover the operations around them (invoice editing,
//! rate table files, material name parsing).
//!
//! ## Example
//!
//! ```rust
//! use cost_core::errors::{CalcError, CalcResult};
//!
//! fn require_dimensions(dimensions: &str) -> CalcResult<()> {
//!     if dimensions.trim().is_empty() {
//!         return Err(CalcError::missing_field("dimensions"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_dimensions("  ").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cost_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for costing and invoice operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (negative rate, unparseable number, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing or blank
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material name could not be resolved
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// The item category has no costing calculator
    #[error("Costing is not available for category '{category}'")]
    NotCostable { category: String },

    /// No invoice line with this id
    #[error("Invoice item not found: {id}")]
    ItemNotFound { id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a NotCostable error
    pub fn not_costable(category: impl Into<String>) -> Self {
        CalcError::NotCostable {
            category: category.into(),
        }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(id: impl ToString) -> Self {
        CalcError::ItemNotFound { id: id.to_string() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if this error is caused by user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::MaterialNotFound { .. }
                | CalcError::NotCostable { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::NotCostable { .. } => "NOT_COSTABLE",
            CalcError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
