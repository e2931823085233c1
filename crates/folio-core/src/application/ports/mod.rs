//! Ports: the application layer's boundary interfaces.
//!
//! Only driven (output) ports exist here — the engine is a library, so its
//! driving side is its public API rather than a trait.

pub mod output;

pub use output::{
    Instrumentation, NoopInstrumentation, PathConvention, RenderBackend, RenderFn,
    TemplateFiles, TemplateMeta,
};
