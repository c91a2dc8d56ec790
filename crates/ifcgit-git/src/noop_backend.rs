use ifcgit_core::domain::*;
use ifcgit_core::error::{Error, ErrorKind};
use ifcgit_core::services::{IfcBackend, IfcRepository, MergeOutcome, Result};
use std::path::Path;
use std::sync::Arc;

const NO_BACKEND: &str = "No git backend enabled. Use the gix backend.";

#[derive(Default)]
pub struct NoopBackend;

impl IfcBackend for NoopBackend {
    fn open(&self, workdir: &Path) -> Result<Arc<dyn IfcRepository>> {
        let _ = workdir;
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }
}

#[allow(dead_code)]
pub(crate) struct NoopRepo {
    spec: RepoSpec,
}

impl IfcRepository for NoopRepo {
    fn spec(&self) -> &RepoSpec {
        &self.spec
    }

    fn current_branch(&self) -> Result<String> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn head_detached(&self) -> Result<bool> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn list_branches(&self) -> Result<Vec<Branch>> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn revision_walk(&self, _branch: &str) -> Result<Vec<Commit>> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn revision_walk_path(&self, _branch: &str, _path: &Path) -> Result<Vec<Commit>> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn resolve_revision(&self, _rev: &str) -> Result<Commit> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn diff_unified(
        &self,
        _from: &RevisionSelector,
        _to: &RevisionSelector,
        _path: &Path,
    ) -> Result<String> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn is_dirty(&self, _path: &Path) -> Result<bool> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn is_tracked(&self, _path: &Path) -> Result<bool> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn stage(&self, _path: &Path) -> Result<()> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn commit(&self, _message: &str) -> Result<()> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn create_branch(&self, _name: &str) -> Result<()> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn checkout_branch(&self, _name: &str) -> Result<()> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn checkout_commit(&self, _id: &CommitId) -> Result<()> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn discard_path(&self, _path: &Path) -> Result<()> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn merge_branch(&self, _name: &str) -> Result<MergeOutcome> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn merge_abort(&self) -> Result<()> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn run_merge_tool(&self, _tool: &str) -> Result<()> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn has_merge_tool(&self, _name: &str) -> Result<bool> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }

    fn write_merge_tool(&self, _config: &MergeToolConfig) -> Result<()> {
        Err(Error::new(ErrorKind::Unsupported(NO_BACKEND)))
    }
}
