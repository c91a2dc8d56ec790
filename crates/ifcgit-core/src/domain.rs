use rustc_hash::FxHashSet;
use std::path::PathBuf;
use std::time::SystemTime;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RepoSpec {
    pub workdir: PathBuf,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CommitId(pub String);

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commit {
    pub id: CommitId,
    pub parent_ids: Vec<CommitId>,
    pub message: String,
    pub author: String,
    pub time: SystemTime,
}

/// One side of a diff: a real revision, or the uncommitted working tree.
///
/// The working tree carries no hash so it can never collide with a
/// revision identifier.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum RevisionSelector {
    WorkingTree,
    Commit(CommitId),
}

impl RevisionSelector {
    pub fn commit(id: impl Into<String>) -> Self {
        Self::Commit(CommitId(id.into()))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Branch {
    pub name: String,
    pub target: CommitId,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag {
    pub name: String,
    pub target: CommitId,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum RevisionFilter {
    #[default]
    All,
    Tagged,
    Relevant,
}

/// Projection of a [`Commit`] for the revision list. `relevant` is true when
/// the commit's change-set touches the tracked model file. Rebuilt wholesale
/// on every refresh, never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevisionEntry {
    pub commit: Commit,
    pub relevant: bool,
}

/// The three pairwise-disjoint sets of STEP identifiers a diff reduces to.
///
/// Constructed by the entity diff engine only; disjointness holds by
/// construction (`modified = inserted ∩ deleted`, the other two are set
/// differences against it).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EntityDelta {
    pub added: FxHashSet<u64>,
    pub removed: FxHashSet<u64>,
    pub modified: FxHashSet<u64>,
}

impl EntityDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// External semantic merge-tool registration, written to repository
/// configuration on first use and never deleted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergeToolConfig {
    pub name: String,
    pub command: String,
    pub trust_exit_code: bool,
}

impl Default for MergeToolConfig {
    fn default() -> Self {
        Self {
            name: "ifcmerge".to_string(),
            command: "ifcmerge $BASE $LOCAL $REMOTE $MERGED".to_string(),
            trust_exit_code: true,
        }
    }
}
