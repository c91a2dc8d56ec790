use ifcgit_core::domain::{Commit, CommitId};
use ifcgit_core::error::{Error, ErrorKind};
use ifcgit_core::services::Result;
use std::process::Command;
use std::str;
use std::time::{Duration, SystemTime};

pub(crate) fn run_git_simple(mut cmd: Command, label: &str) -> Result<()> {
    let output = cmd
        .output()
        .map_err(|e| Error::new(ErrorKind::Io(e.kind())))?;

    if !output.status.success() {
        let stderr = str::from_utf8(&output.stderr).unwrap_or("<non-utf8 stderr>");
        log::warn!("{label} failed: {}", stderr.trim());
        return Err(Error::new(ErrorKind::Backend(format!(
            "{label} failed: {stderr}"
        ))));
    }

    Ok(())
}

pub(crate) fn run_git_capture(mut cmd: Command, label: &str) -> Result<String> {
    let output = cmd
        .output()
        .map_err(|e| Error::new(ErrorKind::Io(e.kind())))?;

    if !output.status.success() {
        let stderr = str::from_utf8(&output.stderr).unwrap_or("<non-utf8 stderr>");
        log::warn!("{label} failed: {}", stderr.trim());
        return Err(Error::new(ErrorKind::Backend(format!(
            "{label} failed: {stderr}"
        ))));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Run a command where a non-zero exit is a negative answer, not an error.
pub(crate) fn run_git_check(mut cmd: Command) -> Result<bool> {
    let output = cmd
        .output()
        .map_err(|e| Error::new(ErrorKind::Io(e.kind())))?;
    Ok(output.status.success())
}

/// Parse records produced by
/// `--pretty=format:%H%x1f%P%x1f%an%x1f%ct%x1f%B%x1e`.
/// The message is the last field, so embedded newlines are safe.
pub(crate) fn parse_log_records(output: &str) -> Vec<Commit> {
    let mut commits = Vec::new();
    for record in output.split('\u{001e}') {
        let record = record.trim_start_matches(['\n', '\r']);
        if record.trim().is_empty() {
            continue;
        }
        let mut parts = record.splitn(5, '\u{001f}');
        let Some(id) = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        else {
            continue;
        };
        let parents = parts.next().unwrap_or_default();
        let author = parts.next().unwrap_or_default().to_string();
        let time_secs = parts
            .next()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(0);
        let message = parts.next().unwrap_or_default().trim_end().to_string();

        let parent_ids = parents
            .split_whitespace()
            .filter(|p| !p.is_empty())
            .map(|p| CommitId(p.to_string()))
            .collect::<Vec<_>>();

        commits.push(Commit {
            id: CommitId(id),
            parent_ids,
            message,
            author,
            time: unix_seconds_to_system_time_or_epoch(time_secs),
        });
    }
    commits
}

pub(crate) fn unix_seconds_to_system_time_or_epoch(seconds: i64) -> SystemTime {
    if seconds >= 0 {
        SystemTime::UNIX_EPOCH + Duration::from_secs(seconds as u64)
    } else {
        SystemTime::UNIX_EPOCH
    }
}
