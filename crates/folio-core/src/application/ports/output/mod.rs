//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `folio-adapters` crate provides implementations. Two further driven
//! ports live in the domain because domain logic consumes them directly:
//! `ExtensionRegistry` (parsing) and `CompiledTemplate` (execution).

use std::path::{Path, PathBuf};

use crate::domain::{BackendError, CompiledTemplate, Member, ViewContext};
use crate::error::FolioResult;

/// Port for template file access.
///
/// Implemented by:
/// - `folio_adapters::template_files::LocalTemplateFiles` (production)
/// - `folio_adapters::template_files::MemoryTemplateFiles` (testing)
///
/// ## Design Notes
///
/// - The resolver joins search directories to relative template paths and
///   probes through `exists`; this port never interprets path grammar.
/// - Read-only: the engine never writes templates.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFiles: Send + Sync {
    /// Check if a candidate file exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a template source to a string.
    fn read(&self, path: &Path) -> FolioResult<String>;

    /// List template files under a directory, as paths relative to it.
    fn list(&self, root: &Path) -> FolioResult<Vec<PathBuf>>;
}

/// Immutable facts about a template handed to the backend at compile time.
///
/// Backends use these for diagnostics and format-sensitive compilation;
/// they are a projection of the descriptor under construction, which does
/// not exist yet when `compile` runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMeta {
    /// Normalized relative path, e.g. `shared/_header.html.erb`.
    pub identifier: String,
    pub format: Option<String>,
    pub extension: Option<String>,
}

/// Port for template compilation.
///
/// Implemented by:
/// - `folio_adapters::backend::SubstitutionBackend` (variable substitution)
///
/// Compilation happens exactly once per descriptor, during finalization;
/// the returned [`CompiledTemplate`] is then shared behind the descriptor
/// cache and executed concurrently.
pub trait RenderBackend: Send + Sync {
    fn compile(
        &self,
        source: &str,
        meta: &TemplateMeta,
    ) -> Result<Box<dyn CompiledTemplate>, BackendError>;
}

/// The bracketed unit of work handed to [`Instrumentation::wrap`].
pub type RenderFn<'a> = &'a mut dyn FnMut() -> FolioResult<String>;

/// Port for render instrumentation.
///
/// Every template execution is wrapped in this call, including nested
/// partial renders — a collection of 50 elements produces 50 wraps. The
/// engine itself emits tracing events independently; this port is for the
/// host's own notification bus.
///
/// ## Contract
///
/// Implementations call `f` exactly once and return its result unchanged —
/// both the rendered string and any error pass through untouched.
pub trait Instrumentation: Send + Sync {
    fn wrap(&self, identifier: &str, f: RenderFn<'_>) -> FolioResult<String>;
}

/// Instrumentation that observes nothing. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstrumentation;

impl Instrumentation for NoopInstrumentation {
    fn wrap(&self, _identifier: &str, f: RenderFn<'_>) -> FolioResult<String> {
        f()
    }
}

/// Port for deriving a partial reference from a domain object.
///
/// Given a member with model name `NewsArticle`, a Rails-flavored
/// convention answers `news_articles/news_article` — a marker-less
/// reference the binder then resolves like any caller-supplied path.
///
/// Implemented by:
/// - `folio_adapters::convention::NaivePluralConvention`
#[cfg_attr(test, mockall::automock)]
pub trait PathConvention: Send + Sync {
    fn partial_reference(&self, member: &Member, view: &ViewContext) -> String;
}
