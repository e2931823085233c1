//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during resolution and rendering orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No search directory contains a file for the requested path.
    #[error("template '{path}' not found in {} search director{}", searched.len(), if searched.len() == 1 { "y" } else { "ies" })]
    TemplateNotFound { path: String, searched: Vec<PathBuf> },

    /// The resolved file could not be read.
    #[error("failed to read template source {file}: {reason}")]
    SourceRead { file: PathBuf, reason: String },

    /// The render backend rejected the template at compile time.
    #[error("failed to compile {file}: {reason}")]
    CompileFailed { file: PathBuf, reason: String },

    /// Executing a compiled template failed.
    ///
    /// `chain` lists the templates involved from outermost to innermost
    /// render; it grows at the front as the error propagates out of nested
    /// partial renders, so the first entry is always the template the
    /// caller asked for and the last is where execution actually failed.
    #[error("render of '{}' failed: {reason}", chain.join("' -> '"))]
    RenderFailed { chain: Vec<String>, reason: String },

    /// The resolver's descriptor cache lock was poisoned.
    #[error("descriptor cache lock poisoned")]
    CacheLock,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { path, searched } => {
                let mut out = vec![format!("No file for '{}' under:", path)];
                out.extend(searched.iter().map(|d| format!("  - {}", d.display())));
                out.push("Check the reference spelling and your --templates directories".into());
                out
            }
            Self::SourceRead { file, .. } => vec![
                format!("Could not read: {}", file.display()),
                "Check that the file exists and is readable".into(),
            ],
            Self::CompileFailed { file, .. } => vec![
                format!("The backend rejected: {}", file.display()),
                "Check the template syntax for that backend".into(),
            ],
            Self::RenderFailed { chain, .. } => {
                let mut out = vec!["Render failed inside this template chain:".into()];
                out.extend(chain.iter().map(|t| format!("  -> {t}")));
                out
            }
            Self::CacheLock => vec![
                "A previous render panicked while holding the cache".into(),
                "Restart the process".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::SourceRead { .. } | Self::CacheLock => ErrorCategory::Internal,
            Self::CompileFailed { .. } | Self::RenderFailed { .. } => ErrorCategory::Rendering,
        }
    }
}
