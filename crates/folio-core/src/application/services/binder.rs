//! Partial Binder - reference dispatch and collection rendering.
//!
//! This service is the caller-facing surface of the engine:
//! 1. Dispatch a [`PartialRef`] to the right rendering strategy
//! 2. Derive lookup paths and local-variable names by convention
//! 3. Bind objects into per-render locals and execute descriptors
//!
//! Every execution goes through the instrumentation port, and every failure
//! escaping a nested render is annotated with the enclosing template so the
//! surfaced error reads as a chain from the outermost request inward.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    application::{
        ports::{Instrumentation, NoopInstrumentation, PathConvention},
        services::resolver::TemplateResolver,
    },
    domain::{naming, Locals, Member, PartialRef, TemplateDescriptor, ViewContext, OBJECT_KEY},
    error::{FolioError, FolioResult},
};

/// The empty-collection sentinel returned by an explicit collection render.
///
/// A deliberate asymmetry preserved from the engine's lineage: rendering an
/// empty collection *reference* yields `""`, but calling the collection
/// entry point directly yields a single space.
const EMPTY_COLLECTION_SENTINEL: &str = " ";

/// Per-call options for a render request.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Caller-supplied bindings, visible inside the partial alongside the
    /// conventional ones. Never mutated by the engine.
    pub locals: Locals,
    /// Alias name: binds the object under this name *in addition to* the
    /// derived variable name.
    pub as_name: Option<String>,
    /// A template reference rendered once and interleaved between
    /// collection fragments.
    pub spacer: Option<String>,
    /// Explicit object for path-shaped references; wins over ambient
    /// lookup.
    pub object: Option<Value>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locals(mut self, locals: Locals) -> Self {
        self.locals = locals;
        self
    }

    pub fn as_name(mut self, name: impl Into<String>) -> Self {
        self.as_name = Some(name.into());
        self
    }

    pub fn spacer(mut self, reference: impl Into<String>) -> Self {
        self.spacer = Some(reference.into());
        self
    }

    pub fn object(mut self, object: Value) -> Self {
        self.object = Some(object);
        self
    }
}

/// Binds partial references to templates and renders them.
///
/// Orchestrates the dispatch, derivation, binding, and execution workflow
/// over the resolver and the convention/instrumentation ports.
pub struct PartialBinder {
    resolver: Arc<TemplateResolver>,
    convention: Box<dyn PathConvention>,
    instrumentation: Box<dyn Instrumentation>,
}

impl PartialBinder {
    /// Create a binder with explicit convention and instrumentation.
    pub fn new(
        resolver: Arc<TemplateResolver>,
        convention: Box<dyn PathConvention>,
        instrumentation: Box<dyn Instrumentation>,
    ) -> Self {
        Self {
            resolver,
            convention,
            instrumentation,
        }
    }

    /// A binder that instruments nothing.
    pub fn uninstrumented(
        resolver: Arc<TemplateResolver>,
        convention: Box<dyn PathConvention>,
    ) -> Self {
        Self::new(resolver, convention, Box::new(NoopInstrumentation))
    }

    /// Render a partial reference.
    ///
    /// Dispatch over the reference shape:
    ///
    /// | Reference | Behavior |
    /// |-----------|----------|
    /// | `Path` | derive pieces, resolve, render with the bound object |
    /// | `Default` | the scope name is the reference; error without a scope |
    /// | `Object` | lookup path from the convention port, render |
    /// | `Builder` | strip `Builder` from the type name, render as a path |
    /// | `Collection` (empty) | `""`, nothing resolved |
    /// | `Collection` | delegate to [`render_collection`](Self::render_collection) |
    #[instrument(skip_all, fields(reference = ?reference))]
    pub fn render_reference(
        &self,
        view: &ViewContext,
        reference: &PartialRef,
        options: &RenderOptions,
    ) -> FolioResult<String> {
        match reference {
            PartialRef::Path(path) => {
                let (variable, lookup) = derive_path_pieces(path, view);
                self.render_partial(view, &lookup, &variable, options.object.clone(), options)
            }
            PartialRef::Default => {
                let reference =
                    view.scope_name()
                        .ok_or_else(|| FolioError::Configuration {
                            message: "a default partial reference needs an ambient naming scope"
                                .into(),
                        })?;
                let (variable, lookup) = derive_path_pieces(&reference, view);
                self.render_partial(view, &lookup, &variable, options.object.clone(), options)
            }
            PartialRef::Object(member) => {
                let lookup = partialize(&self.convention.partial_reference(member, view));
                self.render_partial(
                    view,
                    &lookup,
                    &member.variable_name(),
                    Some(member.value().clone()),
                    options,
                )
            }
            PartialRef::Builder(member) => {
                let reference = naming::builder_reference(member.model_name());
                let (variable, lookup) = derive_path_pieces(&reference, view);
                self.render_partial(
                    view,
                    &lookup,
                    &variable,
                    Some(member.value().clone()),
                    options,
                )
            }
            PartialRef::Collection(members) if members.is_empty() => {
                debug!("Empty collection reference, rendering nothing");
                Ok(String::new())
            }
            PartialRef::Collection(members) => {
                self.render_collection(view, None, members, options)
            }
        }
    }

    /// Render a collection of members, one partial execution per element.
    ///
    /// ## Behavior
    ///
    /// - Empty collection: a single space (sentinel preserved from the
    ///   engine's lineage; distinct from the `""` an empty collection
    ///   *reference* yields).
    /// - `explicit_path` forces every element through one partial;
    ///   otherwise each element's path comes from the convention port, so
    ///   heterogeneous collections are fine. Derivations and descriptors
    ///   are memoized per distinct path for the duration of the call.
    /// - Each element at index `i` renders with a fresh copy of the caller
    ///   locals carrying `object`, `<variable>`, `<variable>_counter = i`,
    ///   and the alias when given. The caller's mapping is never touched.
    /// - Elements render in iteration order; fragments join in that order
    ///   with the spacer (rendered exactly once) between them.
    #[instrument(skip_all, fields(len = members.len(), explicit_path))]
    pub fn render_collection(
        &self,
        view: &ViewContext,
        explicit_path: Option<&str>,
        members: &[Member],
        options: &RenderOptions,
    ) -> FolioResult<String> {
        if members.is_empty() {
            return Ok(EMPTY_COLLECTION_SENTINEL.to_string());
        }

        let separator = match &options.spacer {
            Some(reference) => {
                let (_, lookup) = derive_path_pieces(reference, view);
                let descriptor = self.resolver.resolve(&lookup)?;
                self.render_descriptor(view, &descriptor, &options.locals)?
            }
            None => String::new(),
        };

        // Per-call memo: (variable name, descriptor) by lookup path, so a
        // thousand-element collection parses each distinct identifier once.
        let mut memo: HashMap<String, (String, Arc<TemplateDescriptor>)> = HashMap::new();
        let mut fragments = Vec::with_capacity(members.len());

        for (index, member) in members.iter().enumerate() {
            let (variable, lookup) = match explicit_path {
                Some(path) => derive_path_pieces(path, view),
                None => {
                    let reference = self.convention.partial_reference(member, view);
                    (member.variable_name(), partialize(&reference))
                }
            };

            let (variable, descriptor) = match memo.get(&lookup) {
                Some((variable, descriptor)) => (variable.clone(), Arc::clone(descriptor)),
                None => {
                    let descriptor = self.resolver.resolve(&lookup)?;
                    memo.insert(lookup.clone(), (variable.clone(), Arc::clone(&descriptor)));
                    (variable, descriptor)
                }
            };

            let mut locals = options.locals.clone();
            locals.insert(naming::counter_key(&variable), Value::from(index as u64));
            bind_object(&mut locals, &variable, member.value().clone(), options);

            fragments.push(self.render_descriptor(view, &descriptor, &locals)?);
        }

        Ok(fragments.join(&separator))
    }

    /// Resolve a lookup path and render it with the conventional bindings.
    ///
    /// The bound object is the explicit one when given, otherwise an
    /// ambient value named after the variable, otherwise null.
    fn render_partial(
        &self,
        view: &ViewContext,
        lookup: &str,
        variable: &str,
        explicit: Option<Value>,
        options: &RenderOptions,
    ) -> FolioResult<String> {
        let descriptor = self.resolver.resolve(lookup)?;
        let object = descriptor.bound_object(view, variable, explicit);

        let mut locals = options.locals.clone();
        bind_object(&mut locals, variable, object, options);

        self.render_descriptor(view, &descriptor, &locals)
    }

    /// Execute one descriptor under instrumentation.
    ///
    /// Failures are annotated with this descriptor's path: a nested
    /// `FolioError` riding up through the backend keeps its chain and gains
    /// this frame at the front; foreign backend errors start a chain here.
    pub fn render_descriptor(
        &self,
        view: &ViewContext,
        descriptor: &TemplateDescriptor,
        locals: &Locals,
    ) -> FolioResult<String> {
        let identifier = descriptor.full_path();
        self.instrumentation.wrap(identifier, &mut || {
            descriptor
                .execute(locals, view)
                .map_err(|e| FolioError::from_backend(e, identifier))
        })
    }
}

/// Bind an object under the conventional keys: `object`, the derived
/// variable name, and the alias when one was supplied.
fn bind_object(locals: &mut Locals, variable: &str, object: Value, options: &RenderOptions) {
    locals.insert(OBJECT_KEY, object.clone());
    if let Some(alias) = &options.as_name {
        locals.insert(alias.clone(), object.clone());
    }
    locals.insert(variable, object);
}

/// Derive `(variable_name, lookup_path)` from a path-shaped reference.
///
/// ## Rules
///
/// - `shared/header.html.erb` → (`header`, `shared/_header.html.erb`):
///   variable from the final segment minus suffixes and marker; lookup is
///   the same path with the final segment partial-marked.
/// - Bare `account` under a naming scope `admin` → (`account`,
///   `admin/_account`).
/// - Bare `account` without a scope → (`account`, `_account`).
///
/// Already-marked segments are left alone: `shared/_header` does not
/// become `shared/__header`.
pub fn derive_path_pieces(reference: &str, view: &ViewContext) -> (String, String) {
    let variable = naming::variable_for_reference(reference);

    let lookup = match reference.rsplit_once('/') {
        Some((directory, segment)) => {
            format!("{}/{}", directory, mark_partial(segment))
        }
        None => match view.scope_name() {
            Some(scope) => format!("{}/{}", scope, mark_partial(reference)),
            None => mark_partial(reference),
        },
    };

    (variable, lookup)
}

/// Prefix the final segment of a reference with the partial marker.
fn partialize(reference: &str) -> String {
    match reference.rsplit_once('/') {
        Some((directory, segment)) => format!("{}/{}", directory, mark_partial(segment)),
        None => mark_partial(reference),
    }
}

fn mark_partial(segment: &str) -> String {
    if segment.starts_with(naming::PARTIAL_MARKER) {
        segment.to_string()
    } else {
        format!("{}{}", naming::PARTIAL_MARKER, segment)
    }
}
