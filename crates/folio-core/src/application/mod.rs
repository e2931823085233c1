//! Application layer for Folio.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateResolver, PartialBinder)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Path grammar and binding conventions live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{PartialBinder, RenderOptions, TemplateEntry, TemplateResolver};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Instrumentation, NoopInstrumentation, PathConvention, RenderBackend, RenderFn,
    TemplateFiles, TemplateMeta,
};

pub use error::ApplicationError;
