// ============================================================================
// domain/error.rs - DOMAIN ERROR TAXONOMY
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers may hold onto them across retries of *other* work)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Domain errors are deterministic: the same raw path fails the same way
/// every time, so nothing here is retryable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    /// The raw path does not decompose into (directory, base, format,
    /// extension) under the template path grammar.
    #[error("malformed template path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("required field missing: {field}")]
    MissingField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedPath { path, reason } => vec![
                format!("Could not parse '{}': {}", path, reason),
                "Template paths look like 'dir/name', 'dir/name.format' or 'dir/name.format.ext'"
                    .into(),
                "A filename carries at most three trailing dot-segments".into(),
            ],
            Self::MissingField { field } => vec![
                format!("Internal builder misuse: '{}' was never supplied", field),
                "This is a bug, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedPath { .. } => ErrorCategory::Validation,
            Self::MissingField { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories a domain error can fall into. Resolution and rendering
/// failures live in the application layer, so this set is narrower than
/// the crate-root one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
