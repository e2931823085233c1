//! Command handlers.
//!
//! Each submodule owns one subcommand; the shared engine wiring (search
//! path, extension registry, scope) lives here so every command builds the
//! same stack from the same flags.

pub mod inspect;
pub mod list;
pub mod render;

use std::sync::Arc;

use folio_adapters::{
    LocalTemplateFiles, NaivePluralConvention, StaticExtensions, StaticScope,
    SubstitutionBackend, TracingInstrumentation,
};
use folio_core::{
    application::{PartialBinder, TemplateResolver},
    domain::ViewContext,
};

use crate::cli::EngineArgs;

/// The always-registered handler extension.
const DEFAULT_EXTENSIONS: [&str; 1] = ["erb"];

pub(crate) fn build_registry(engine: &EngineArgs) -> Arc<StaticExtensions> {
    let tokens = DEFAULT_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .chain(engine.extensions.iter().cloned());
    Arc::new(StaticExtensions::new(tokens))
}

pub(crate) fn build_resolver(engine: &EngineArgs) -> Arc<TemplateResolver> {
    Arc::new(TemplateResolver::new(
        Box::new(LocalTemplateFiles::new()),
        Box::new(SubstitutionBackend::new()),
        build_registry(engine),
        engine.templates.clone(),
    ))
}

pub(crate) fn build_binder(resolver: Arc<TemplateResolver>) -> PartialBinder {
    PartialBinder::new(
        resolver,
        Box::new(NaivePluralConvention::new()),
        Box::new(TracingInstrumentation::new()),
    )
}

pub(crate) fn build_view(engine: &EngineArgs) -> ViewContext {
    match &engine.scope {
        Some(name) => StaticScope::named(name).into_view(),
        None => ViewContext::new(),
    }
}
