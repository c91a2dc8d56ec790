use crate::domain::*;
use crate::error::{Error, ErrorKind};
use std::path::Path;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a backend merge attempt. A conflict is expected and
/// recoverable; any other failure surfaces as an `Err`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeOutcome {
    Clean,
    Conflict,
}

/// A repository under version control, consumed as a black box.
///
/// Implementations wrap the actual version-control backend; nothing behind
/// this trait is reimplemented here. All calls are blocking and
/// subprocess-slow; callers wanting responsiveness offload the whole call.
pub trait IfcRepository: Send + Sync {
    fn spec(&self) -> &RepoSpec;

    fn current_branch(&self) -> Result<String>;
    fn head_detached(&self) -> Result<bool>;
    fn list_branches(&self) -> Result<Vec<Branch>>;
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// All commits reachable from `branch`, newest first, in the order the
    /// backend's history walk yields them. An invalid or dangling branch
    /// yields an empty list, not an error.
    fn revision_walk(&self, branch: &str) -> Result<Vec<Commit>>;

    /// The subset of `revision_walk` whose change-set touches `path`.
    fn revision_walk_path(&self, branch: &str, path: &Path) -> Result<Vec<Commit>>;

    /// Revision metadata for a hash or symbolic name such as `HEAD`.
    fn resolve_revision(&self, rev: &str) -> Result<Commit>;

    /// Line-oriented unified diff between two selectors, restricted to
    /// `path`. [`RevisionSelector::WorkingTree`] on either side compares
    /// against the uncommitted state.
    fn diff_unified(
        &self,
        from: &RevisionSelector,
        to: &RevisionSelector,
        path: &Path,
    ) -> Result<String>;

    fn is_dirty(&self, path: &Path) -> Result<bool>;
    fn is_tracked(&self, path: &Path) -> Result<bool>;

    fn stage(&self, path: &Path) -> Result<()>;
    fn commit(&self, message: &str) -> Result<()>;
    fn create_branch(&self, name: &str) -> Result<()>;
    fn checkout_branch(&self, name: &str) -> Result<()>;
    fn checkout_commit(&self, id: &CommitId) -> Result<()>;
    fn discard_path(&self, path: &Path) -> Result<()>;

    /// Merge `name` into the current branch. `Ok(Conflict)` is the backend's
    /// own conflict classification, never message matching.
    fn merge_branch(&self, name: &str) -> Result<MergeOutcome>;

    /// Restore working tree and index to their pre-merge state.
    fn merge_abort(&self) -> Result<()>;

    /// Run the configured external merge tool over the conflicted paths.
    fn run_merge_tool(&self, tool: &str) -> Result<()>;

    fn has_merge_tool(&self, name: &str) -> Result<bool>;
    fn write_merge_tool(&self, config: &MergeToolConfig) -> Result<()>;
}

pub trait IfcBackend: Send + Sync {
    /// Open the repository whose working directory is exactly `workdir`.
    /// `ErrorKind::NotARepository` is a normal miss for the locator walk.
    fn open(&self, workdir: &Path) -> Result<Arc<dyn IfcRepository>>;

    fn init(&self, _workdir: &Path) -> Result<Arc<dyn IfcRepository>> {
        Err(Error::new(ErrorKind::Unsupported(
            "repository creation is not implemented for this backend",
        )))
    }
}

/// The loaded building model, answering classification and ownership
/// queries for STEP identifiers. Loading always purges and reloads the
/// whole model; there is no partial reload.
pub trait EntityModel {
    fn class_of(&self, id: u64) -> Option<String>;
    fn product_of_shape(&self, id: u64) -> Option<u64>;
    fn load(&mut self, path: &Path) -> Result<()>;
}
