//! Build errors for guards and guard tables.

use crate::core::DomainError;
use thiserror::Error;

/// Errors that can occur when building guards and guard tables.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Operation not specified. Call .operation(f) before .build()")]
    MissingOperation,

    #[error("No guards defined. Add at least one guard")]
    NoGuards,

    #[error("Operation '{name}' is guarded more than once")]
    DuplicateOperation { name: String },

    #[error("Invalid state domain: {0}")]
    Domain(#[from] DomainError),
}
