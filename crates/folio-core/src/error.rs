//! Unified error handling for Folio Core.
//!
//! This module provides a unified error type that wraps domain and
//! application errors, with rich context and user-actionable suggestions.
//! It also carries the template-chain annotation that makes failures inside
//! nested partial renders diagnosable.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{BackendError, DomainError};

/// Root error type for Folio Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// folio-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FolioError {
    /// Errors from the domain layer (path grammar, descriptor invariants).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (resolution and rendering).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl FolioError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Folio".into(),
                "Please report this issue with the full error output".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Record that the error escaped a render of `template`.
    ///
    /// Render failures carry the chain of templates the error propagated
    /// through, outermost first. Each enclosing render frame calls this on
    /// the way out; the frame's template is pushed onto the front unless it
    /// is already there, so annotating the same frame twice is a no-op.
    /// Non-render errors pass through untouched.
    pub fn annotate_render(self, template: &str) -> Self {
        match self {
            Self::Application(ApplicationError::RenderFailed { mut chain, reason }) => {
                if chain.first().map(String::as_str) != Some(template) {
                    chain.insert(0, template.to_string());
                }
                Self::Application(ApplicationError::RenderFailed { chain, reason })
            }
            other => other,
        }
    }

    /// Reconstruct a `FolioError` from a backend error.
    ///
    /// A nested partial render surfaces its failure to the enclosing
    /// backend execution as a [`BackendError`]; downcasting recovers the
    /// original error (and its chain) instead of flattening it to a string.
    /// Genuine backend failures become a fresh single-template render
    /// failure rooted at `template`.
    pub fn from_backend(err: BackendError, template: &str) -> Self {
        match err.downcast::<FolioError>() {
            Ok(inner) => inner.annotate_render(template),
            Err(other) => Self::Application(ApplicationError::RenderFailed {
                chain: vec![template.to_string()],
                reason: other.to_string(),
            }),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Rendering,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type FolioResult<T> = Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn render_failed(chain: &[&str]) -> FolioError {
        FolioError::Application(ApplicationError::RenderFailed {
            chain: chain.iter().map(|s| s.to_string()).collect(),
            reason: "boom".into(),
        })
    }

    #[test]
    fn annotate_render_prepends_outer_frame() {
        let err = render_failed(&["_inner.html.erb"]).annotate_render("outer.html.erb");
        assert_eq!(
            err,
            render_failed(&["outer.html.erb", "_inner.html.erb"])
        );
    }

    #[test]
    fn annotate_render_is_idempotent_per_frame() {
        let once = render_failed(&["_p.html.erb"]).annotate_render("_p.html.erb");
        assert_eq!(once, render_failed(&["_p.html.erb"]));
    }

    #[test]
    fn annotate_render_ignores_other_errors() {
        let err = FolioError::Configuration {
            message: "bad".into(),
        };
        assert_eq!(err.clone().annotate_render("x"), err);
    }

    #[test]
    fn from_backend_recovers_nested_chain() {
        let inner: BackendError = Box::new(render_failed(&["_inner.html.erb"]));
        let err = FolioError::from_backend(inner, "outer.html.erb");
        assert_eq!(
            err,
            render_failed(&["outer.html.erb", "_inner.html.erb"])
        );
    }

    #[test]
    fn from_backend_wraps_foreign_errors() {
        let io: BackendError = Box::new(std::io::Error::other("disk gone"));
        let err = FolioError::from_backend(io, "page.html.erb");
        assert_eq!(
            err,
            FolioError::Application(ApplicationError::RenderFailed {
                chain: vec!["page.html.erb".into()],
                reason: "disk gone".into(),
            })
        );
    }
}
