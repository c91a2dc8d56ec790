use crate::domain::CommitId;
use crate::services::{IfcRepository, Result};
use rustc_hash::FxHashMap;

/// Reverse lookup commit hash → branch names.
///
/// Several branches may point at the same revision, so the value is always
/// a list; collapsing it to a single name loses information.
pub fn branches_by_revision(repo: &dyn IfcRepository) -> Result<FxHashMap<CommitId, Vec<String>>> {
    let mut lookup: FxHashMap<CommitId, Vec<String>> = FxHashMap::default();
    for branch in repo.list_branches()? {
        lookup.entry(branch.target).or_default().push(branch.name);
    }
    Ok(lookup)
}

/// Reverse lookup commit hash → tag names.
pub fn tags_by_revision(repo: &dyn IfcRepository) -> Result<FxHashMap<CommitId, Vec<String>>> {
    let mut lookup: FxHashMap<CommitId, Vec<String>> = FxHashMap::default();
    for tag in repo.list_tags()? {
        lookup.entry(tag.target).or_default().push(tag.name);
    }
    Ok(lookup)
}
