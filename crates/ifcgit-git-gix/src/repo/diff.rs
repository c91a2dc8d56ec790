use super::GixRepo;
use crate::util::{run_git_capture, run_git_check};
use ifcgit_core::domain::RevisionSelector;
use ifcgit_core::services::Result;
use std::path::Path;
use std::process::Command;

impl GixRepo {
    /// Unified diff between two selectors restricted to one path. The
    /// working tree is selected by omitting the second revision argument,
    /// the way the porcelain expresses "uncommitted vs revision".
    pub(super) fn diff_unified_impl(
        &self,
        from: &RevisionSelector,
        to: &RevisionSelector,
        path: &Path,
    ) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("-c")
            .arg("color.ui=false")
            .arg("--no-pager")
            .arg("diff");

        match (from, to) {
            (RevisionSelector::WorkingTree, RevisionSelector::WorkingTree) => {
                return Ok(String::new());
            }
            (RevisionSelector::Commit(a), RevisionSelector::Commit(b)) => {
                cmd.arg(a.as_ref()).arg(b.as_ref());
            }
            (RevisionSelector::Commit(rev), RevisionSelector::WorkingTree)
            | (RevisionSelector::WorkingTree, RevisionSelector::Commit(rev)) => {
                cmd.arg(rev.as_ref());
            }
        }

        cmd.arg("--").arg(path);
        run_git_capture(cmd, "git diff")
    }

    /// True when the file has staged or unstaged changes. Untracked files
    /// are not dirt; they have no committed state to differ from.
    pub(super) fn is_dirty_impl(&self, path: &Path) -> Result<bool> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("status")
            .arg("--porcelain")
            .arg("--")
            .arg(path);

        let output = run_git_capture(cmd, "git status --porcelain")?;
        Ok(output
            .lines()
            .any(|line| !line.is_empty() && !line.starts_with("??")))
    }

    pub(super) fn is_tracked_impl(&self, path: &Path) -> Result<bool> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("ls-files")
            .arg("--error-unmatch")
            .arg("--")
            .arg(path);
        run_git_check(cmd)
    }
}
