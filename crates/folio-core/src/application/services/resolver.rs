//! Template Resolver - turns raw paths into finalized descriptors.
//!
//! The resolver coordinates the descriptor lifecycle:
//! 1. Parse the raw path under the grammar
//! 2. Probe the ordered search directories for a concrete file
//! 3. Read the source and compile it through the render backend
//! 4. Finalize an immutable descriptor and cache it
//!
//! Resolution is memoized: the same raw path yields the same `Arc`'d
//! descriptor for the resolver's lifetime, so a template is read and
//! compiled exactly once no matter how many renders reference it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{RenderBackend, TemplateFiles, TemplateMeta},
    },
    domain::{ExtensionRegistry, PathParts, TemplateDescriptor},
    error::{FolioError, FolioResult},
};

/// One template file discovered by [`TemplateResolver::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// The search directory the file was found under.
    pub search_root: PathBuf,
    /// Path relative to the search root, e.g. `shared/_header.html.erb`.
    pub logical_path: String,
    pub is_partial: bool,
}

/// Resolves and caches template descriptors.
///
/// ## Concurrency
///
/// The cache is an `RwLock<HashMap>`; hits take the read lock only. Two
/// threads racing on a cold path may both build the descriptor, in which
/// case the second insert wins — descriptors for the same file are
/// interchangeable, so the duplicate work is harmless.
pub struct TemplateResolver {
    files: Box<dyn TemplateFiles>,
    backend: Box<dyn RenderBackend>,
    extensions: Arc<dyn ExtensionRegistry>,
    search_paths: Vec<PathBuf>,
    cache: RwLock<HashMap<String, Arc<TemplateDescriptor>>>,
}

impl TemplateResolver {
    /// Create a resolver over an ordered list of search directories.
    ///
    /// Order is significant: the first directory containing a file for a
    /// given path wins, which is how a host overlays its own templates on
    /// top of library defaults.
    pub fn new(
        files: Box<dyn TemplateFiles>,
        backend: Box<dyn RenderBackend>,
        extensions: Arc<dyn ExtensionRegistry>,
        search_paths: Vec<PathBuf>,
    ) -> Self {
        Self {
            files,
            backend,
            extensions,
            search_paths,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Resolve a raw template path to a finalized descriptor.
    #[instrument(skip(self))]
    pub fn resolve(&self, raw_path: &str) -> FolioResult<Arc<TemplateDescriptor>> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|_| ApplicationError::CacheLock)?;
            if let Some(descriptor) = cache.get(raw_path) {
                debug!(path = raw_path, "Descriptor cache hit");
                return Ok(Arc::clone(descriptor));
            }
        }

        let descriptor = Arc::new(self.build(raw_path)?);

        let mut cache = self
            .cache
            .write()
            .map_err(|_| ApplicationError::CacheLock)?;
        // A racing builder may have inserted already; keep whichever is
        // there and return ours, they are interchangeable.
        cache
            .entry(raw_path.to_string())
            .or_insert_with(|| Arc::clone(&descriptor));

        Ok(descriptor)
    }

    /// List every template file under the search directories, in search
    /// order. Files whose names do not parse are skipped rather than
    /// failing the whole listing.
    #[instrument(skip(self))]
    pub fn list(&self) -> FolioResult<Vec<TemplateEntry>> {
        let mut entries = Vec::new();
        for root in &self.search_paths {
            for relative in self.files.list(root)? {
                let logical_path = relative.to_string_lossy().replace('\\', "/");
                let Ok(parts) = PathParts::parse(&logical_path, self.extensions.as_ref()) else {
                    debug!(path = %logical_path, "Skipping unparseable template name");
                    continue;
                };
                entries.push(TemplateEntry {
                    search_root: root.clone(),
                    logical_path,
                    is_partial: parts.is_partial(),
                });
            }
        }
        Ok(entries)
    }

    fn build(&self, raw_path: &str) -> FolioResult<TemplateDescriptor> {
        let parts = PathParts::parse(raw_path, self.extensions.as_ref())?;
        let relative = PathBuf::from(parts.logical_path());

        // Ordered search directories first, then the raw path taken
        // literally (callers may hand an already-concrete file path).
        let (resolved_file, search_root) = self
            .search_paths
            .iter()
            .map(|root| (root.join(&relative), Some(root.clone())))
            .chain(std::iter::once((relative.clone(), None)))
            .find(|(candidate, _)| self.files.exists(candidate))
            .ok_or_else(|| ApplicationError::TemplateNotFound {
                path: raw_path.to_string(),
                searched: self.search_paths.clone(),
            })?;

        info!(file = %resolved_file.display(), "Template resolved");

        let raw_source = self.files.read(&resolved_file)?;

        let meta = TemplateMeta {
            identifier: parts.logical_path(),
            format: parts.format.clone(),
            extension: parts.extension.clone(),
        };
        let compiled = self.backend.compile(&raw_source, &meta).map_err(|e| {
            FolioError::Application(ApplicationError::CompileFailed {
                file: resolved_file.clone(),
                reason: e.to_string(),
            })
        })?;

        Ok(TemplateDescriptor::builder(parts, resolved_file)
            .search_root(search_root)
            .raw_source(raw_source)
            .compiled(compiled)
            .finalize()?)
    }
}
