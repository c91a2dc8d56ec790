use crate::domain::{RevisionEntry, RevisionFilter};
use crate::refindex;
use crate::services::{IfcRepository, Result};
use rustc_hash::FxHashSet;
use std::path::Path;

/// Build the ordered, filtered revision list for one branch.
///
/// Emits commits in exactly the order the backend's history walk yields
/// them. Relevance membership is keyed by commit hash, not structural
/// commit equality. A dangling `branch` yields an empty list.
pub fn build_list(
    repo: &dyn IfcRepository,
    branch: &str,
    filter: RevisionFilter,
    path: &Path,
) -> Result<Vec<RevisionEntry>> {
    let commits = repo.revision_walk(branch)?;
    if commits.is_empty() {
        return Ok(Vec::new());
    }

    let relevant: FxHashSet<_> = repo
        .revision_walk_path(branch, path)?
        .into_iter()
        .map(|commit| commit.id)
        .collect();

    let tagged = match filter {
        RevisionFilter::Tagged => Some(refindex::tags_by_revision(repo)?),
        _ => None,
    };

    let mut entries = Vec::with_capacity(commits.len());
    for commit in commits {
        match filter {
            RevisionFilter::All => {}
            RevisionFilter::Tagged => {
                let has_tag = tagged
                    .as_ref()
                    .is_some_and(|lookup| lookup.contains_key(&commit.id));
                if !has_tag {
                    continue;
                }
            }
            RevisionFilter::Relevant => {
                if !relevant.contains(&commit.id) {
                    continue;
                }
            }
        }

        let relevant = relevant.contains(&commit.id);
        entries.push(RevisionEntry { commit, relevant });
    }

    Ok(entries)
}
