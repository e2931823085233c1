//! Folio Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Folio
//! template resolution and partial-rendering engine, following hexagonal
//! (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           folio-cli (CLI)               │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (TemplateResolver, PartialBinder)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Files, Backend, Convention...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     folio-adapters (Infrastructure)     │
//! │ (LocalTemplateFiles, Substitution, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (PathParts, TemplateDescriptor, ...)   │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use folio_core::{
//!     application::{
//!         PartialBinder, RenderOptions, TemplateResolver,
//!         ports::{PathConvention, RenderBackend, TemplateFiles},
//!     },
//!     domain::{ExtensionRegistry, PartialRef, ViewContext},
//!     error::FolioResult,
//! };
//!
//! fn render_header(
//!     files: Box<dyn TemplateFiles>,
//!     backend: Box<dyn RenderBackend>,
//!     extensions: Arc<dyn ExtensionRegistry>,
//!     convention: Box<dyn PathConvention>,
//! ) -> FolioResult<String> {
//!     // 1. Build a resolver over the search path (with injected adapters)
//!     let resolver = Arc::new(TemplateResolver::new(
//!         files,
//!         backend,
//!         extensions,
//!         vec!["templates".into()],
//!     ));
//!
//!     // 2. Bind and render a partial
//!     let binder = PartialBinder::uninstrumented(resolver, convention);
//!     binder.render_reference(
//!         &ViewContext::new(),
//!         &PartialRef::path("shared/header.html.erb"),
//!         &RenderOptions::new(),
//!     )
//! }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        PartialBinder, RenderOptions, TemplateEntry, TemplateResolver,
        ports::{Instrumentation, PathConvention, RenderBackend, TemplateFiles, TemplateMeta},
    };
    pub use crate::domain::{
        AmbientScope, BackendError, CompiledTemplate, ExtensionRegistry, Locals, Member,
        PartialRef, PathParts, TemplateDescriptor, ViewContext, OBJECT_KEY,
    };
    pub use crate::error::{FolioError, FolioResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
