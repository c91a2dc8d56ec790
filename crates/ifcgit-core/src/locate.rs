use crate::services::{IfcBackend, IfcRepository};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolves the repository enclosing a file or directory by walking
/// ancestor directories, with a single-entry handle cache keyed by the
/// resolved working directory.
///
/// A miss is a normal query result: callers render an empty state, they do
/// not handle an error.
pub struct RepoLocator {
    backend: Arc<dyn IfcBackend>,
    cached: Option<Arc<dyn IfcRepository>>,
}

impl RepoLocator {
    pub fn new(backend: Arc<dyn IfcBackend>) -> Self {
        Self {
            backend,
            cached: None,
        }
    }

    pub fn backend(&self) -> &Arc<dyn IfcBackend> {
        &self.backend
    }

    /// Drop the cached handle, forcing the next `resolve` to re-open.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn resolve(&mut self, path: &Path) -> Option<Arc<dyn IfcRepository>> {
        let start = search_start(path)?;

        if let Some(repo) = &self.cached {
            if start.starts_with(&repo.spec().workdir) {
                return Some(Arc::clone(repo));
            }
        }

        let mut candidate = start;
        loop {
            if let Ok(repo) = self.backend.open(&candidate) {
                self.cached = Some(Arc::clone(&repo));
                return Some(repo);
            }

            let parent = candidate.parent()?.to_path_buf();
            if parent == candidate {
                return None;
            }
            candidate = parent;
        }
    }
}

/// A file path starts the search at its containing directory.
fn search_start(path: &Path) -> Option<PathBuf> {
    let dir = if path.is_file() {
        path.parent()?.to_path_buf()
    } else {
        path.to_path_buf()
    };
    Some(dir.canonicalize().unwrap_or(dir))
}
