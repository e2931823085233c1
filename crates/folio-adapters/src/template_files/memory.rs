//! In-memory template file adapter for testing and embedded use.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use folio_core::{
    application::{ports::TemplateFiles, ApplicationError},
    error::{FolioError, FolioResult},
};

/// In-memory template files, shared by `Clone`.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateFiles {
    inner: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MemoryTemplateFiles {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template source under a path.
    pub fn insert(&self, path: impl Into<PathBuf>, source: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.insert(path.into(), source.into());
        }
    }

    /// Remove everything.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.clear();
        }
    }
}

impl TemplateFiles for MemoryTemplateFiles {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains_key(path))
            .unwrap_or(false)
    }

    fn read(&self, path: &Path) -> FolioResult<String> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        inner.get(path).cloned().ok_or_else(|| {
            ApplicationError::SourceRead {
                file: path.to_path_buf(),
                reason: "no such entry".into(),
            }
            .into()
        })
    }

    fn list(&self, root: &Path) -> FolioResult<Vec<PathBuf>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        let mut out: Vec<PathBuf> = inner
            .keys()
            .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect();
        out.sort();
        Ok(out)
    }
}

fn poisoned() -> FolioError {
    FolioError::Internal {
        message: "template store lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_read() {
        let files = MemoryTemplateFiles::new();
        files.insert("/t/_item.html.erb", "body");

        assert!(files.exists(Path::new("/t/_item.html.erb")));
        assert_eq!(files.read(Path::new("/t/_item.html.erb")).unwrap(), "body");
    }

    #[test]
    fn clones_share_the_same_store() {
        let files = MemoryTemplateFiles::new();
        let alias = files.clone();
        alias.insert("/t/a", "x");

        assert!(files.exists(Path::new("/t/a")));
    }

    #[test]
    fn list_strips_the_root_prefix() {
        let files = MemoryTemplateFiles::new();
        files.insert("/t/shared/_header", "");
        files.insert("/t/index", "");
        files.insert("/elsewhere/other", "");

        assert_eq!(
            files.list(Path::new("/t")).unwrap(),
            vec![PathBuf::from("index"), PathBuf::from("shared/_header")]
        );
    }

    #[test]
    fn missing_entry_read_is_a_source_error() {
        let files = MemoryTemplateFiles::new();
        let err = files.read(Path::new("/t/none")).unwrap_err();
        assert!(err.to_string().contains("no such entry"));
    }
}
