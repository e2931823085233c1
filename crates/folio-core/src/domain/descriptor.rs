//! Template descriptors: parsed, resolved, finalized template identities.
//!
//! This module defines the leaf of the engine following the same layering
//! discipline as the rest of the domain: pure logic, capabilities behind
//! traits, I/O supplied by the caller.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Descriptor lifecycle                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PathParts::parse(raw)          - grammar over the filename │
//! │  (resolver probes search dirs)  - picks the concrete file   │
//! │  DescriptorBuilder              - collects source+compiled  │
//! │  .finalize()                    - derives everything once   │
//! │  TemplateDescriptor             - immutable, memoized value │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Decisions
//!
//! ### Why a builder that dies at `finalize()`?
//!
//! The original engine froze a mutable object after computing its memoized
//! views, and policed later mutation at runtime. Here the builder is the
//! only mutable stage and it is *consumed*: [`TemplateDescriptor`] exposes
//! no mutators at all, so "mutating a finalized descriptor" is not a runtime
//! error — it does not compile.
//!
//! ### Why are derived values plain fields, not lazy cells?
//!
//! Every derived value is a cheap pure function of the raw fields, and the
//! descriptor is built exactly once per distinct on-disk template. Computing
//! them eagerly in `finalize()` keeps every later read a plain field access,
//! which is what makes unsynchronized concurrent reads of a cached
//! descriptor trivially safe.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use super::error::DomainError;
use super::locals::Locals;
use super::naming::PARTIAL_MARKER;
use super::view::ViewContext;

/// The file-format tokens a filename may carry, at most, beyond its base
/// name: one (possibly multipart) format and one extension.
const MAX_DOT_SEGMENTS: usize = 4;

// ============================================================================
// Capabilities
// ============================================================================

/// Registry of handler extensions, consulted during parsing.
///
/// A single trailing dot-segment is ambiguous: `foo.html` is a format,
/// `foo.erb` is an extension — the difference is whether the token is
/// registered here. The set is treated as fixed for the lifetime of a
/// resolver; re-registration never retroactively affects already-parsed
/// descriptors.
pub trait ExtensionRegistry: Send + Sync {
    fn is_registered(&self, token: &str) -> bool;
}

/// Errors escaping a render backend.
///
/// Backends are external collaborators with their own failure vocabularies;
/// the engine only needs `Display` to diagnose and a stable `Box` to carry
/// an already-annotated engine error back up through nested renders.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The executable form of a template, produced by the render backend's
/// compile step during finalization.
///
/// This is a **driven port**: the domain dictates the shape, backends
/// implement it. Execution is synchronous and runs to completion.
pub trait CompiledTemplate: Send + Sync {
    fn execute(&self, locals: &Locals, view: &ViewContext) -> Result<String, BackendError>;
}

// ============================================================================
// Path grammar
// ============================================================================

/// The structured decomposition of a raw template path.
///
/// ## Grammar
///
/// The filename (text after the final `/`) splits on `.` into one to four
/// segments, read right to left:
///
/// | Shape | directory | base | format | extension |
/// |-------|-----------|------|--------|-----------|
/// | `name` | — | `name` | — | — |
/// | `name.X` (X registered) | — | `name` | — | `X` |
/// | `name.X` (X unknown) | — | `name` | `X` | — |
/// | `name.X.Y` | — | `name` | `X` | `Y` |
/// | `name.X.Y.Z` | — | `name` | `X.Y` | `Z` |
/// | `dir/sub/name.X.Y` | `dir/sub` | `name` | `X` | `Y` |
///
/// More than four segments, or any empty segment, fails with
/// [`DomainError::MalformedPath`].
///
/// ## Invariants
///
/// - `base_name` never contains a dot.
/// - `format` and `extension` never contain path separators.
/// - `directory` carries no trailing separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathParts {
    pub directory: Option<String>,
    pub base_name: String,
    /// May itself contain one dot (multipart format, e.g. `html.iphone`).
    pub format: Option<String>,
    pub extension: Option<String>,
}

impl PathParts {
    /// Parse a raw template path against the given extension registry.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedPath`] when no base name can be
    /// extracted: empty input, empty filename (`dir/`), an empty dot-segment
    /// (`foo..html`), or more than three trailing dot-segments.
    pub fn parse(raw_path: &str, extensions: &dyn ExtensionRegistry) -> Result<Self, DomainError> {
        let malformed = |reason: &str| DomainError::MalformedPath {
            path: raw_path.to_string(),
            reason: reason.to_string(),
        };

        let (directory, file_name) = match raw_path.rfind('/') {
            Some(idx) => {
                let dir = raw_path[..idx].trim_end_matches('/');
                let dir = (!dir.is_empty()).then(|| dir.to_string());
                (dir, &raw_path[idx + 1..])
            }
            None => (None, raw_path),
        };

        if file_name.is_empty() {
            return Err(malformed("no base name"));
        }

        let segments: Vec<&str> = file_name.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(malformed("empty dot-segment"));
        }
        if segments.len() > MAX_DOT_SEGMENTS {
            return Err(malformed("too many dot-segments"));
        }

        let base_name = segments[0].to_string();
        let (format, extension) = match segments.len() {
            1 => (None, None),
            // One trailing segment: registry membership decides its meaning.
            2 => {
                if extensions.is_registered(segments[1]) {
                    (None, Some(segments[1].to_string()))
                } else {
                    (Some(segments[1].to_string()), None)
                }
            }
            3 => (
                Some(segments[1].to_string()),
                Some(segments[2].to_string()),
            ),
            // Multipart format: the middle two segments jointly.
            _ => (
                Some(format!("{}.{}", segments[1], segments[2])),
                Some(segments[3].to_string()),
            ),
        };

        Ok(Self {
            directory,
            base_name,
            format,
            extension,
        })
    }

    /// The filename these parts describe: `base[.format][.extension]`.
    pub fn file_name(&self) -> String {
        let mut name = self.base_name.clone();
        if let Some(format) = &self.format {
            name.push('.');
            name.push_str(format);
        }
        if let Some(extension) = &self.extension {
            name.push('.');
            name.push_str(extension);
        }
        name
    }

    /// The normalized relative path: `directory/base[.format][.extension]`.
    pub fn logical_path(&self) -> String {
        match &self.directory {
            Some(dir) => format!("{}/{}", dir, self.file_name()),
            None => self.file_name(),
        }
    }

    /// True iff the base name carries the partial marker.
    pub fn is_partial(&self) -> bool {
        self.base_name.starts_with(PARTIAL_MARKER)
    }
}

// ============================================================================
// The descriptor
// ============================================================================

/// A resolved, finalized template identity.
///
/// ## Invariants
///
/// - Immutable: no method takes `&mut self`; there is nothing to freeze
///   because there is nothing to thaw.
/// - Every derived view was computed exactly once, in
///   [`DescriptorBuilder::finalize`]; reads are O(1) field access.
/// - Identity is the resolved file path: two descriptors for the same
///   on-disk file are interchangeable.
///
/// ## Lifecycle
///
/// Constructed once per distinct template path at first lookup, cached by
/// the resolver behind an `Arc`, reused across render calls and threads
/// without locking, dropped only at cache teardown.
pub struct TemplateDescriptor {
    parts: PathParts,
    search_root: Option<PathBuf>,
    resolved_file: PathBuf,
    is_partial: bool,
    full_path: String,
    path_without_extension: String,
    path_without_format_and_extension: String,
    raw_source: String,
    cache_key: String,
    compiled: Box<dyn CompiledTemplate>,
}

impl TemplateDescriptor {
    /// Start building a descriptor from parsed parts and a resolved file.
    pub fn builder(parts: PathParts, resolved_file: impl Into<PathBuf>) -> DescriptorBuilder {
        DescriptorBuilder {
            parts,
            resolved_file: resolved_file.into(),
            search_root: None,
            raw_source: None,
            compiled: None,
        }
    }

    /// The search directory under which the file was found, or `None` when
    /// the raw path hit directly.
    pub fn search_root(&self) -> Option<&Path> {
        self.search_root.as_deref()
    }

    pub fn directory(&self) -> Option<&str> {
        self.parts.directory.as_deref()
    }

    pub fn base_name(&self) -> &str {
        &self.parts.base_name
    }

    pub fn format(&self) -> Option<&str> {
        self.parts.format.as_deref()
    }

    pub fn extension(&self) -> Option<&str> {
        self.parts.extension.as_deref()
    }

    /// The concrete file this descriptor is bound to. Descriptor identity.
    pub fn resolved_file(&self) -> &Path {
        &self.resolved_file
    }

    /// True iff the base name carries the partial marker (`_account`).
    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    /// Normalized relative path: `dir/base[.format][.extension]`.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// [`full_path`](Self::full_path) minus the extension token.
    pub fn path_without_extension(&self) -> &str {
        &self.path_without_extension
    }

    /// [`full_path`](Self::full_path) minus both format and extension.
    pub fn path_without_format_and_extension(&self) -> &str {
        &self.path_without_format_and_extension
    }

    /// The template source, read exactly once during finalization.
    pub fn raw_source(&self) -> &str {
        &self.raw_source
    }

    /// A filesystem-safe encoding of the resolved path, suitable as a cache
    /// file or map key. Every character outside `[A-Za-z0-9._-]` becomes
    /// `-`; distinct paths may collide, which is acceptable for its use as
    /// a human-recognizable cache name.
    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// The backend-compiled executable form.
    pub fn compiled(&self) -> &dyn CompiledTemplate {
        self.compiled.as_ref()
    }

    /// Execute the compiled template against the given bindings.
    ///
    /// This is the raw backend call; instrumentation wrapping and failure
    /// annotation live in the application layer's render path.
    pub fn execute(&self, locals: &Locals, view: &ViewContext) -> Result<String, BackendError> {
        self.compiled.execute(locals, view)
    }

    /// Resolve the object a partial binds: an explicit object wins, then an
    /// ambient value named after the variable, then null.
    pub fn bound_object(
        &self,
        view: &ViewContext,
        variable_name: &str,
        explicit: Option<Value>,
    ) -> Value {
        explicit
            .or_else(|| view.lookup_value(variable_name))
            .unwrap_or(Value::Null)
    }
}

impl fmt::Debug for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateDescriptor")
            .field("full_path", &self.full_path)
            .field("resolved_file", &self.resolved_file)
            .field("search_root", &self.search_root)
            .field("format", &self.parts.format)
            .field("extension", &self.parts.extension)
            .field("is_partial", &self.is_partial)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TemplateDescriptor`] — the only mutable stage of a
/// descriptor's life.
///
/// The resolver supplies the pieces that require I/O (`raw_source` from the
/// filesystem port, `compiled` from the render backend); `finalize()` then
/// derives every memoized view and consumes the builder.
pub struct DescriptorBuilder {
    parts: PathParts,
    resolved_file: PathBuf,
    search_root: Option<PathBuf>,
    raw_source: Option<String>,
    compiled: Option<Box<dyn CompiledTemplate>>,
}

impl DescriptorBuilder {
    /// Record which search directory produced the hit.
    pub fn search_root(mut self, root: Option<PathBuf>) -> Self {
        self.search_root = root;
        self
    }

    pub fn raw_source(mut self, source: impl Into<String>) -> Self {
        self.raw_source = Some(source.into());
        self
    }

    pub fn compiled(mut self, compiled: Box<dyn CompiledTemplate>) -> Self {
        self.compiled = Some(compiled);
        self
    }

    /// Compute every derived view and produce the immutable descriptor.
    ///
    /// # Errors
    ///
    /// [`DomainError::MissingField`] if `raw_source` or `compiled` were
    /// never supplied — a programming error in the resolver, not a user
    /// input problem.
    pub fn finalize(self) -> Result<TemplateDescriptor, DomainError> {
        let raw_source = self
            .raw_source
            .ok_or(DomainError::MissingField { field: "raw_source" })?;
        let compiled = self
            .compiled
            .ok_or(DomainError::MissingField { field: "compiled" })?;

        let full_path = self.parts.logical_path();

        let path_without_extension = match &self.parts.extension {
            Some(ext) => full_path
                .strip_suffix(&format!(".{ext}"))
                .unwrap_or(&full_path)
                .to_string(),
            None => full_path.clone(),
        };

        let path_without_format_and_extension = match &self.parts.directory {
            Some(dir) => format!("{}/{}", dir, self.parts.base_name),
            None => self.parts.base_name.clone(),
        };

        let cache_key = cache_key_for(&self.resolved_file);
        let is_partial = self.parts.is_partial();

        Ok(TemplateDescriptor {
            parts: self.parts,
            search_root: self.search_root,
            resolved_file: self.resolved_file,
            is_partial,
            full_path,
            path_without_extension,
            path_without_format_and_extension,
            raw_source,
            cache_key,
            compiled,
        })
    }
}

/// Encode an absolute path into a filesystem-safe key.
fn cache_key_for(path: &Path) -> String {
    path.to_string_lossy()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// A registry recognizing a fixed token set.
    struct FixedRegistry(HashSet<&'static str>);

    impl FixedRegistry {
        fn of(tokens: &[&'static str]) -> Self {
            Self(tokens.iter().copied().collect())
        }
    }

    impl ExtensionRegistry for FixedRegistry {
        fn is_registered(&self, token: &str) -> bool {
            self.0.contains(token)
        }
    }

    fn registry() -> FixedRegistry {
        FixedRegistry::of(&["erb", "haml"])
    }

    /// A compiled template that echoes a fixed string; descriptor tests do
    /// not care about execution.
    struct Echo(&'static str);

    impl CompiledTemplate for Echo {
        fn execute(&self, _: &Locals, _: &ViewContext) -> Result<String, BackendError> {
            Ok(self.0.to_string())
        }
    }

    fn descriptor_for(raw: &str) -> TemplateDescriptor {
        let parts = PathParts::parse(raw, &registry()).unwrap();
        TemplateDescriptor::builder(parts, format!("/app/views/{raw}"))
            .search_root(Some("/app/views".into()))
            .raw_source("<h1>source</h1>")
            .compiled(Box::new(Echo("out")))
            .finalize()
            .unwrap()
    }

    // ========================================================================
    // Parse table
    // ========================================================================

    #[test]
    fn parse_bare_name() {
        let parts = PathParts::parse("foo", &registry()).unwrap();
        assert_eq!(parts.directory, None);
        assert_eq!(parts.base_name, "foo");
        assert_eq!(parts.format, None);
        assert_eq!(parts.extension, None);
    }

    #[test]
    fn parse_single_segment_unregistered_is_format() {
        let parts = PathParts::parse("foo.html", &registry()).unwrap();
        assert_eq!(parts.format.as_deref(), Some("html"));
        assert_eq!(parts.extension, None);
    }

    #[test]
    fn parse_single_segment_registered_is_extension() {
        let parts = PathParts::parse("foo.erb", &registry()).unwrap();
        assert_eq!(parts.format, None);
        assert_eq!(parts.extension.as_deref(), Some("erb"));
    }

    #[test]
    fn parse_two_segments() {
        let parts = PathParts::parse("foo.html.erb", &registry()).unwrap();
        assert_eq!(parts.base_name, "foo");
        assert_eq!(parts.format.as_deref(), Some("html"));
        assert_eq!(parts.extension.as_deref(), Some("erb"));
    }

    #[test]
    fn parse_multipart_format() {
        let parts = PathParts::parse("foo.html.iphone.erb", &registry()).unwrap();
        assert_eq!(parts.format.as_deref(), Some("html.iphone"));
        assert_eq!(parts.extension.as_deref(), Some("erb"));
    }

    #[test]
    fn parse_with_directory() {
        let parts = PathParts::parse("dir/sub/_item.html.erb", &registry()).unwrap();
        assert_eq!(parts.directory.as_deref(), Some("dir/sub"));
        assert_eq!(parts.base_name, "_item");
        assert_eq!(parts.format.as_deref(), Some("html"));
        assert_eq!(parts.extension.as_deref(), Some("erb"));
        assert!(parts.is_partial());
    }

    #[test]
    fn parse_strips_redundant_directory_slashes() {
        let parts = PathParts::parse("dir//name", &registry()).unwrap();
        assert_eq!(parts.directory.as_deref(), Some("dir"));
        assert_eq!(parts.base_name, "name");
    }

    #[test]
    fn parse_rejects_degenerate_paths() {
        for bad in ["", "dir/", ".html", "foo..html", "a.b.c.d.e", "/"] {
            let err = PathParts::parse(bad, &registry()).unwrap_err();
            assert!(
                matches!(err, DomainError::MalformedPath { .. }),
                "expected MalformedPath for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn parse_base_name_never_contains_dot() {
        for raw in ["foo", "foo.html", "foo.html.erb", "foo.html.iphone.erb"] {
            let parts = PathParts::parse(raw, &registry()).unwrap();
            assert!(!parts.base_name.contains('.'), "raw = {raw}");
        }
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    #[test]
    fn derived_paths() {
        let d = descriptor_for("dir/sub/_item.html.erb");
        assert_eq!(d.full_path(), "dir/sub/_item.html.erb");
        assert_eq!(d.path_without_extension(), "dir/sub/_item.html");
        assert_eq!(d.path_without_format_and_extension(), "dir/sub/_item");
        assert!(d.is_partial());
    }

    #[test]
    fn derived_paths_without_tokens() {
        let d = descriptor_for("index");
        assert_eq!(d.full_path(), "index");
        assert_eq!(d.path_without_extension(), "index");
        assert_eq!(d.path_without_format_and_extension(), "index");
        assert!(!d.is_partial());
    }

    #[test]
    fn cache_key_is_filesystem_safe() {
        let d = descriptor_for("dir/sub/_item.html.erb");
        assert_eq!(d.cache_key(), "-app-views-dir-sub-_item.html.erb");
        assert!(d.cache_key().chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
        }));
    }

    #[test]
    fn finalize_requires_source_and_compiled() {
        let parts = PathParts::parse("foo", &registry()).unwrap();
        let err = TemplateDescriptor::builder(parts.clone(), "/t/foo")
            .compiled(Box::new(Echo("")))
            .finalize()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingField { field: "raw_source" });

        let err = TemplateDescriptor::builder(parts, "/t/foo")
            .raw_source("src")
            .finalize()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingField { field: "compiled" });
    }

    #[test]
    fn bound_object_precedence() {
        use serde_json::json;

        let d = descriptor_for("_account.html.erb");
        let view = ViewContext::new();

        // Explicit wins even over ambient (no ambient here) and null fallback.
        assert_eq!(
            d.bound_object(&view, "account", Some(json!(1))),
            json!(1)
        );
        assert_eq!(d.bound_object(&view, "account", None), Value::Null);
    }

    #[test]
    fn search_root_recorded() {
        let d = descriptor_for("foo.html.erb");
        assert_eq!(d.search_root(), Some(Path::new("/app/views")));
        assert_eq!(d.raw_source(), "<h1>source</h1>");
    }
}
