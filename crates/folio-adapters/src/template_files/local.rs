//! Local template file adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use folio_core::{application::ports::TemplateFiles, error::FolioResult};

/// Production template file access using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalTemplateFiles;

impl LocalTemplateFiles {
    /// Create a new local file adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalTemplateFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateFiles for LocalTemplateFiles {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> FolioResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e))
    }

    fn list(&self, root: &Path) -> FolioResult<Vec<PathBuf>> {
        let mut out = Vec::new();
        if root.is_dir() {
            walk(root, root, &mut out)?;
        }
        // Deterministic listing order regardless of directory iteration
        out.sort();
        Ok(out)
    }
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> FolioResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| map_io_error(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| map_io_error(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            out.push(relative.to_path_buf());
        }
    }
    Ok(())
}

fn map_io_error(path: &Path, e: io::Error) -> folio_core::error::FolioError {
    use folio_core::application::ApplicationError;

    ApplicationError::SourceRead {
        file: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}
