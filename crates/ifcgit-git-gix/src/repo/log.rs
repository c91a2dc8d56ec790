use super::GixRepo;
use crate::util::{parse_log_records, run_git_capture, unix_seconds_to_system_time_or_epoch};
use gix::bstr::ByteSlice as _;
use gix::traverse::commit::simple::CommitTimeOrder;
use ifcgit_core::domain::{Commit, CommitId};
use ifcgit_core::error::{Error, ErrorKind};
use ifcgit_core::services::Result;
use std::path::Path;
use std::process::Command;

const LOG_FORMAT: &str = "%H%x1f%P%x1f%an%x1f%ct%x1f%B%x1e";

fn commit_from_walk_info(info: &gix::revision::walk::Info<'_>, id: String) -> Result<Commit> {
    let commit_obj = info
        .object()
        .map_err(|e| Error::new(ErrorKind::Backend(format!("gix commit object: {e}"))))?;

    let message = commit_obj
        .message_raw_sloppy()
        .to_str_lossy()
        .trim_end()
        .to_string();

    let author = commit_obj
        .author()
        .map(|s| s.name.to_str_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());

    let seconds = commit_obj.time().map(|t| t.seconds).unwrap_or(0);
    let time = unix_seconds_to_system_time_or_epoch(seconds);

    let parent_ids = info
        .parent_ids()
        .map(|parent_id| CommitId(parent_id.detach().to_string()))
        .collect::<Vec<_>>();

    Ok(Commit {
        id: CommitId(id),
        parent_ids,
        message,
        author,
        time,
    })
}

impl GixRepo {
    /// Walk all commits reachable from a local branch, newest first. An
    /// unknown branch is an empty history, not an error.
    pub(super) fn revision_walk_impl(&self, branch: &str) -> Result<Vec<Commit>> {
        let repo = self._repo.to_thread_local();

        let Ok(mut reference) = repo.find_reference(branch) else {
            return Ok(Vec::new());
        };
        let tip = reference
            .peel_to_id_in_place()
            .map_err(|e| Error::new(ErrorKind::Backend(format!("gix peel ref: {e}"))))?
            .detach();

        let walk = repo
            .rev_walk([tip])
            .sorting(gix::revision::walk::Sorting::ByCommitTime(
                CommitTimeOrder::NewestFirst,
            ))
            .all()
            .map_err(|e| Error::new(ErrorKind::Backend(format!("gix rev_walk: {e}"))))?;

        let mut commits = Vec::new();
        for info in walk {
            let info =
                info.map_err(|e| Error::new(ErrorKind::Backend(format!("gix walk: {e}"))))?;
            let id = info.id().detach().to_string();
            commits.push(commit_from_walk_info(&info, id)?);
        }
        Ok(commits)
    }

    /// Path-scoped history via `git log --follow`, matching the porcelain's
    /// rename tracking.
    pub(super) fn revision_walk_path_impl(&self, branch: &str, path: &Path) -> Result<Vec<Commit>> {
        let repo = self._repo.to_thread_local();
        if repo.find_reference(branch).is_err() {
            return Ok(Vec::new());
        }

        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("-c")
            .arg("color.ui=false")
            .arg("--no-pager")
            .arg("log")
            .arg("--follow")
            .arg("--date=unix")
            .arg(format!("--pretty=format:{LOG_FORMAT}"))
            .arg(branch)
            .arg("--")
            .arg(path);

        let output = run_git_capture(cmd, "git log --follow")?;
        Ok(parse_log_records(&output))
    }

    pub(super) fn resolve_revision_impl(&self, rev: &str) -> Result<Commit> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.spec.workdir)
            .arg("show")
            .arg("-s")
            .arg("--date=unix")
            .arg(format!("--pretty=format:{LOG_FORMAT}"))
            .arg(rev);

        let output = run_git_capture(cmd, "git show -s")?;
        parse_log_records(&output)
            .into_iter()
            .next()
            .ok_or_else(|| Error::new(ErrorKind::Backend(format!("unknown revision: {rev}"))))
    }
}
