//! Error types for SWA/EAS data loading.

use thiserror::Error;

/// Result type alias using SwaError.
pub type SwaResult<T> = Result<T, SwaError>;

/// Primary error type for SWA data-product operations.
#[derive(Debug, Error)]
pub enum SwaError {
    // === Adapter Errors ===
    #[error("Variable not found in file: {0}")]
    VariableNotFound(String),

    #[error("Cannot parse unit '{unit}' for variable '{variable}'")]
    UnitParse { variable: String, unit: String },

    #[error("Epoch time conversion failed: {0}")]
    TimeConversion(String),

    // === Dispatch Errors ===
    #[error("No registered product type matches descriptor '{descriptor}'")]
    NoMatchingProduct { descriptor: String },

    #[error("File matched more than one product type: {names:?}")]
    AmbiguousProduct { names: Vec<String> },

    #[error("File with descriptor '{descriptor}' is not a source for product type {product}")]
    TypeMismatch {
        product: &'static str,
        descriptor: String,
    },

    // === Data Errors ===
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command execution failed: {0}")]
    Command(String),
}
