use super::GixRepo;
use crate::util::run_git_simple;
use ifcgit_core::domain::CommitId;
use ifcgit_core::services::Result;
use std::path::Path;
use std::process::Command;

impl GixRepo {
    pub(super) fn stage_impl(&self, path: &Path) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("add")
            .arg("--")
            .arg(path);
        run_git_simple(cmd, "git add")
    }

    pub(super) fn commit_impl(&self, message: &str) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("commit")
            .arg("-m")
            .arg(message);
        run_git_simple(cmd, "git commit")
    }

    pub(super) fn create_branch_impl(&self, name: &str) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.spec.workdir).arg("branch").arg(name);
        run_git_simple(cmd, "git branch")
    }

    pub(super) fn checkout_branch_impl(&self, name: &str) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("checkout")
            .arg(name);
        run_git_simple(cmd, "git checkout")
    }

    pub(super) fn checkout_commit_impl(&self, id: &CommitId) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("checkout")
            .arg(id.as_ref());
        run_git_simple(cmd, "git checkout <commit>")
    }

    /// Restore one file to its committed state.
    pub(super) fn discard_path_impl(&self, path: &Path) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("checkout")
            .arg("--")
            .arg(path);
        run_git_simple(cmd, "git checkout -- <path>")
    }
}
