use crate::domain::{CommitId, MergeToolConfig};
use crate::refindex;
use crate::services::{IfcRepository, MergeOutcome, Result};
use std::path::Path;

/// Where the orchestrator currently is, or finished.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MergePhase {
    #[default]
    Idle,
    ToolConfigCheck,
    Attempting,
    ConflictResolving,
    Succeeded,
    Aborted,
}

/// Structured outcome of a merge attempt. Callers decide what to retry from
/// this, not from error types.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MergeReport {
    Merged {
        branch: String,
        commit_message: String,
        /// Whatever branch the backend reports as active after the merge;
        /// re-read rather than assumed.
        active_branch: String,
    },
    /// The selection does not correspond to the displayed branch; the
    /// operation is not a merge and nothing was touched.
    NotABranch,
    Failed {
        /// True when a merge-abort was issued and succeeded, leaving the
        /// working tree and index in their pre-merge state.
        rolled_back: bool,
        message: String,
    },
}

/// Merge state machine:
/// `Idle → ToolConfigCheck → Attempting → {Succeeded | ConflictResolving →
/// {Succeeded | Aborted}}`.
///
/// Side effects reach the repository only on success; an aborted merge
/// leaves working tree and index as they were before the attempt.
#[derive(Default)]
pub struct MergeOrchestrator {
    phase: MergePhase,
}

impl MergeOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MergePhase {
        self.phase
    }

    /// Merge the branch whose tip is `selected` into the current branch.
    /// Only a branch name matching `display_branch` is eligible.
    pub fn run(
        &mut self,
        repo: &dyn IfcRepository,
        selected: &CommitId,
        display_branch: &str,
        path: &Path,
        tool: &MergeToolConfig,
    ) -> MergeReport {
        self.phase = MergePhase::ToolConfigCheck;
        if let Err(e) = ensure_merge_tool(repo, tool) {
            self.phase = MergePhase::Aborted;
            return MergeReport::Failed {
                rolled_back: false,
                message: format!("could not configure merge tool {}: {e}", tool.name),
            };
        }

        self.phase = MergePhase::Attempting;
        let branch = match eligible_branch(repo, selected, display_branch) {
            Ok(Some(branch)) => branch,
            Ok(None) => {
                self.phase = MergePhase::Aborted;
                return MergeReport::NotABranch;
            }
            Err(e) => {
                self.phase = MergePhase::Aborted;
                return MergeReport::Failed {
                    rolled_back: false,
                    message: format!("could not resolve branches: {e}"),
                };
            }
        };

        match repo.merge_branch(&branch) {
            Ok(MergeOutcome::Clean) => self.finish(repo, &branch, path),
            Ok(MergeOutcome::Conflict) => {
                self.phase = MergePhase::ConflictResolving;
                match repo.run_merge_tool(&tool.name) {
                    // Tool resolution is treated identically to a clean merge.
                    Ok(()) => self.finish(repo, &branch, path),
                    Err(_) => self.abort(repo, "IFC Merge failed"),
                }
            }
            // The original left the repository as-is here; this
            // implementation rolls back on every non-success outcome.
            Err(_) => self.abort(repo, "Unknown IFC Merge failure"),
        }
    }

    fn finish(&mut self, repo: &dyn IfcRepository, branch: &str, path: &Path) -> MergeReport {
        if let Err(e) = repo.stage(path) {
            self.phase = MergePhase::Aborted;
            return MergeReport::Failed {
                rolled_back: false,
                message: format!("merge succeeded but staging failed: {e}"),
            };
        }

        let active_branch = repo
            .current_branch()
            .unwrap_or_else(|_| branch.to_string());

        self.phase = MergePhase::Succeeded;
        MergeReport::Merged {
            branch: branch.to_string(),
            commit_message: format!("Merged branch: {branch}"),
            active_branch,
        }
    }

    fn abort(&mut self, repo: &dyn IfcRepository, message: &str) -> MergeReport {
        let rolled_back = repo.merge_abort().is_ok();
        self.phase = MergePhase::Aborted;
        MergeReport::Failed {
            rolled_back,
            message: message.to_string(),
        }
    }
}

/// Write the mergetool configuration section if absent. Idempotent.
pub fn ensure_merge_tool(repo: &dyn IfcRepository, tool: &MergeToolConfig) -> Result<()> {
    if repo.has_merge_tool(&tool.name)? {
        return Ok(());
    }
    repo.write_merge_tool(tool)
}

/// Resolve the selection to a mergeable branch: of the branch names sharing
/// the selected revision, only the one matching the displayed branch is
/// eligible.
fn eligible_branch(
    repo: &dyn IfcRepository,
    selected: &CommitId,
    display_branch: &str,
) -> Result<Option<String>> {
    let lookup = refindex::branches_by_revision(repo)?;
    Ok(lookup
        .get(selected)
        .and_then(|names| names.iter().find(|name| *name == display_branch))
        .cloned())
}
