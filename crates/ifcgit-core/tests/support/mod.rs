#![allow(dead_code)]

use ifcgit_core::domain::*;
use ifcgit_core::error::{Error, ErrorKind};
use ifcgit_core::services::{IfcBackend, IfcRepository, MergeOutcome, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

pub fn commit(id: &str, seconds: u64) -> Commit {
    Commit {
        id: CommitId(id.to_string()),
        parent_ids: Vec::new(),
        message: format!("commit {id}"),
        author: "you".to_string(),
        time: SystemTime::UNIX_EPOCH + Duration::from_secs(seconds),
    }
}

/// What a scripted `merge_branch` call should produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeScript {
    Clean,
    Conflict,
    OtherError,
}

/// Scripted in-memory repository recording every mutating call.
pub struct FakeRepo {
    pub spec: RepoSpec,
    pub head: CommitId,
    pub current_branch: String,
    pub branches: Vec<Branch>,
    pub tags: Vec<Tag>,
    pub commits: Vec<Commit>,
    pub relevant: Vec<CommitId>,
    pub patch: String,
    pub merge_script: MergeScript,
    pub tool_fails: bool,
    pub has_tool: Mutex<bool>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeRepo {
    pub fn new(workdir: &str) -> Self {
        Self {
            spec: RepoSpec {
                workdir: PathBuf::from(workdir),
            },
            head: CommitId("0".to_string()),
            current_branch: "main".to_string(),
            branches: Vec::new(),
            tags: Vec::new(),
            commits: Vec::new(),
            relevant: Vec::new(),
            patch: String::new(),
            merge_script: MergeScript::Clean,
            tool_fails: false,
            has_tool: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl IfcRepository for FakeRepo {
    fn spec(&self) -> &RepoSpec {
        &self.spec
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.current_branch.clone())
    }

    fn head_detached(&self) -> Result<bool> {
        Ok(false)
    }

    fn list_branches(&self) -> Result<Vec<Branch>> {
        Ok(self.branches.clone())
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn revision_walk(&self, branch: &str) -> Result<Vec<Commit>> {
        if !self.branches.iter().any(|b| b.name == branch) {
            return Ok(Vec::new());
        }
        Ok(self.commits.clone())
    }

    fn revision_walk_path(&self, branch: &str, _path: &Path) -> Result<Vec<Commit>> {
        if !self.branches.iter().any(|b| b.name == branch) {
            return Ok(Vec::new());
        }
        Ok(self
            .commits
            .iter()
            .filter(|c| self.relevant.contains(&c.id))
            .cloned()
            .collect())
    }

    fn resolve_revision(&self, rev: &str) -> Result<Commit> {
        let id = if rev == "HEAD" {
            self.head.clone()
        } else {
            CommitId(rev.to_string())
        };
        self.commits
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::Backend(format!("unknown revision {rev}"))))
    }

    fn diff_unified(
        &self,
        _from: &RevisionSelector,
        _to: &RevisionSelector,
        _path: &Path,
    ) -> Result<String> {
        Ok(self.patch.clone())
    }

    fn is_dirty(&self, _path: &Path) -> Result<bool> {
        Ok(false)
    }

    fn is_tracked(&self, _path: &Path) -> Result<bool> {
        Ok(true)
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.record(format!("stage {}", path.display()));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(format!("commit {message}"));
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.record(format!("create_branch {name}"));
        Ok(())
    }

    fn checkout_branch(&self, name: &str) -> Result<()> {
        self.record(format!("checkout_branch {name}"));
        Ok(())
    }

    fn checkout_commit(&self, id: &CommitId) -> Result<()> {
        self.record(format!("checkout_commit {}", id.as_ref()));
        Ok(())
    }

    fn discard_path(&self, path: &Path) -> Result<()> {
        self.record(format!("discard {}", path.display()));
        Ok(())
    }

    fn merge_branch(&self, name: &str) -> Result<MergeOutcome> {
        self.record(format!("merge {name}"));
        match self.merge_script {
            MergeScript::Clean => Ok(MergeOutcome::Clean),
            MergeScript::Conflict => Ok(MergeOutcome::Conflict),
            MergeScript::OtherError => Err(Error::new(ErrorKind::Backend(
                "scripted merge failure".to_string(),
            ))),
        }
    }

    fn merge_abort(&self) -> Result<()> {
        self.record("merge_abort");
        Ok(())
    }

    fn run_merge_tool(&self, tool: &str) -> Result<()> {
        self.record(format!("mergetool {tool}"));
        if self.tool_fails {
            return Err(Error::new(ErrorKind::Backend(
                "scripted tool failure".to_string(),
            )));
        }
        Ok(())
    }

    fn has_merge_tool(&self, _name: &str) -> Result<bool> {
        Ok(*self.has_tool.lock().unwrap())
    }

    fn write_merge_tool(&self, config: &MergeToolConfig) -> Result<()> {
        self.record(format!("write_merge_tool {}", config.name));
        *self.has_tool.lock().unwrap() = true;
        Ok(())
    }
}

/// Backend that only opens a repository at exactly `root`.
pub struct FakeBackend {
    pub root: PathBuf,
    pub make_repo: Box<dyn Fn() -> FakeRepo + Send + Sync>,
}

impl FakeBackend {
    pub fn rooted(root: &Path) -> Self {
        let workdir = root.to_path_buf();
        Self {
            root: root.to_path_buf(),
            make_repo: Box::new(move || FakeRepo::new(&workdir.to_string_lossy())),
        }
    }
}

impl IfcBackend for FakeBackend {
    fn open(&self, workdir: &Path) -> Result<Arc<dyn IfcRepository>> {
        if workdir == self.root {
            Ok(Arc::new((self.make_repo)()))
        } else {
            Err(Error::new(ErrorKind::NotARepository))
        }
    }
}
