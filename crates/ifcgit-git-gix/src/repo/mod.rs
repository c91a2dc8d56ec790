use ifcgit_core::domain::{
    Branch, Commit, CommitId, MergeToolConfig, RepoSpec, RevisionSelector, Tag,
};
use ifcgit_core::services::{IfcRepository, MergeOutcome, Result};
use std::path::{Path, PathBuf};

mod diff;
mod log;
mod merge;
mod porcelain;
mod refs;

pub(crate) struct GixRepo {
    spec: RepoSpec,
    _workdir: PathBuf,
    _repo: gix::ThreadSafeRepository,
}

impl GixRepo {
    pub(crate) fn new(workdir: PathBuf, repo: gix::ThreadSafeRepository) -> Self {
        Self {
            spec: RepoSpec {
                workdir: workdir.clone(),
            },
            _workdir: workdir,
            _repo: repo,
        }
    }
}

impl IfcRepository for GixRepo {
    fn spec(&self) -> &RepoSpec {
        &self.spec
    }

    fn current_branch(&self) -> Result<String> {
        self.current_branch_impl()
    }

    fn head_detached(&self) -> Result<bool> {
        self.head_detached_impl()
    }

    fn list_branches(&self) -> Result<Vec<Branch>> {
        self.list_branches_impl()
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        self.list_tags_impl()
    }

    fn revision_walk(&self, branch: &str) -> Result<Vec<Commit>> {
        self.revision_walk_impl(branch)
    }

    fn revision_walk_path(&self, branch: &str, path: &Path) -> Result<Vec<Commit>> {
        self.revision_walk_path_impl(branch, path)
    }

    fn resolve_revision(&self, rev: &str) -> Result<Commit> {
        self.resolve_revision_impl(rev)
    }

    fn diff_unified(
        &self,
        from: &RevisionSelector,
        to: &RevisionSelector,
        path: &Path,
    ) -> Result<String> {
        self.diff_unified_impl(from, to, path)
    }

    fn is_dirty(&self, path: &Path) -> Result<bool> {
        self.is_dirty_impl(path)
    }

    fn is_tracked(&self, path: &Path) -> Result<bool> {
        self.is_tracked_impl(path)
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.stage_impl(path)
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.commit_impl(message)
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.create_branch_impl(name)
    }

    fn checkout_branch(&self, name: &str) -> Result<()> {
        self.checkout_branch_impl(name)
    }

    fn checkout_commit(&self, id: &CommitId) -> Result<()> {
        self.checkout_commit_impl(id)
    }

    fn discard_path(&self, path: &Path) -> Result<()> {
        self.discard_path_impl(path)
    }

    fn merge_branch(&self, name: &str) -> Result<MergeOutcome> {
        self.merge_branch_impl(name)
    }

    fn merge_abort(&self) -> Result<()> {
        self.merge_abort_impl()
    }

    fn run_merge_tool(&self, tool: &str) -> Result<()> {
        self.run_merge_tool_impl(tool)
    }

    fn has_merge_tool(&self, name: &str) -> Result<bool> {
        self.has_merge_tool_impl(name)
    }

    fn write_merge_tool(&self, config: &MergeToolConfig) -> Result<()> {
        self.write_merge_tool_impl(config)
    }
}
