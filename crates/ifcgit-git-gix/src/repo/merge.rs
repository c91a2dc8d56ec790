use super::GixRepo;
use crate::util::{run_git_check, run_git_simple};
use ifcgit_core::domain::MergeToolConfig;
use ifcgit_core::error::{Error, ErrorKind};
use ifcgit_core::services::{MergeOutcome, Result};
use std::process::Command;
use std::str;

impl GixRepo {
    /// Merge a branch into the current one. A failed merge counts as a
    /// conflict iff `MERGE_HEAD` exists afterwards, i.e. the classification
    /// comes from git's own merge state, never from message text.
    pub(super) fn merge_branch_impl(&self, name: &str) -> Result<MergeOutcome> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.spec.workdir)
            .arg("-c")
            .arg("color.ui=false")
            .arg("--no-pager")
            .arg("merge")
            .arg("--no-edit")
            .arg(name)
            .output()
            .map_err(|e| Error::new(ErrorKind::Io(e.kind())))?;

        if output.status.success() {
            return Ok(MergeOutcome::Clean);
        }

        if self.merge_in_progress()? {
            return Ok(MergeOutcome::Conflict);
        }

        let stderr = str::from_utf8(&output.stderr).unwrap_or("<non-utf8 stderr>");
        log::warn!("git merge {name} failed without conflict state: {}", stderr.trim());
        Err(Error::new(ErrorKind::Backend(format!(
            "git merge failed: {}",
            stderr.trim()
        ))))
    }

    fn merge_in_progress(&self) -> Result<bool> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("rev-parse")
            .arg("-q")
            .arg("--verify")
            .arg("MERGE_HEAD");
        run_git_check(cmd)
    }

    pub(super) fn merge_abort_impl(&self) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("merge")
            .arg("--abort");
        run_git_simple(cmd, "git merge --abort")
    }

    pub(super) fn run_merge_tool_impl(&self, tool: &str) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("mergetool")
            .arg("--no-prompt")
            .arg(format!("--tool={tool}"));
        run_git_simple(cmd, "git mergetool")
    }

    pub(super) fn has_merge_tool_impl(&self, name: &str) -> Result<bool> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("config")
            .arg("--local")
            .arg("--get")
            .arg(format!("mergetool.{name}.cmd"));
        run_git_check(cmd)
    }

    pub(super) fn write_merge_tool_impl(&self, config: &MergeToolConfig) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("config")
            .arg("--local")
            .arg(format!("mergetool.{}.cmd", config.name))
            .arg(&config.command);
        run_git_simple(cmd, "git config mergetool.cmd")?;

        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("config")
            .arg("--local")
            .arg(format!("mergetool.{}.trustExitCode", config.name))
            .arg(if config.trust_exit_code { "true" } else { "false" });
        run_git_simple(cmd, "git config mergetool.trustExitCode")
    }
}
